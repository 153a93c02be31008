use std::fmt;

/// State of the output path, derived fresh on every refresh.
///
/// Only [`Absent`](Self::Absent) and [`CleanRepo`](Self::CleanRepo) allow a
/// refresh to write anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDirectoryState {
    Absent,
    CleanRepo,
    DirtyRepo,
    NotARepo,
}

impl TargetDirectoryState {
    pub fn permits_refresh(self) -> bool {
        matches!(self, Self::Absent | Self::CleanRepo)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::CleanRepo => "clean repository",
            Self::DirtyRepo => "dirty repository",
            Self::NotARepo => "not a repository",
        }
    }
}

impl fmt::Display for TargetDirectoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_absent_and_clean_permit_refresh() {
        assert!(TargetDirectoryState::Absent.permits_refresh());
        assert!(TargetDirectoryState::CleanRepo.permits_refresh());
        assert!(!TargetDirectoryState::DirtyRepo.permits_refresh());
        assert!(!TargetDirectoryState::NotARepo.permits_refresh());
    }
}
