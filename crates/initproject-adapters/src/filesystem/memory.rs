//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use initproject_core::application::{FilesystemError, ports::Filesystem};

/// In-memory filesystem for testing.
///
/// Clones share the same storage, so a test can keep one handle while the
/// service under test owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        {
            let mut inner = self.write();
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_dirs(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Seed a directory and its parents.
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.write().add_dirs(path.as_ref());
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read().files.get(path.as_ref()).cloned()
    }

    /// All files, sorted by path.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read().files.keys().cloned().collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MemoryFilesystemInner {
    fn add_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> Result<(), FilesystemError> {
        let mut inner = self.write();
        if inner.files.contains_key(path) {
            return Err(FilesystemError {
                path: path.to_path_buf(),
                operation: "create directory",
                reason: "a file exists at this path".into(),
            });
        }
        inner.add_dirs(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), FilesystemError> {
        let mut inner = self.write();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(FilesystemError {
                    path: path.to_path_buf(),
                    operation: "write file",
                    reason: "parent directory does not exist".into(),
                });
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> Result<String, FilesystemError> {
        self.read_file(path).ok_or_else(|| FilesystemError {
            path: path.to_path_buf(),
            operation: "read file",
            reason: "no such file".into(),
        })
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), FilesystemError> {
        let content = self.read_file(from).ok_or_else(|| FilesystemError {
            path: from.to_path_buf(),
            operation: "copy file",
            reason: "no such file".into(),
        })?;
        self.write_file(to, &content)
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.read();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read().directories.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.read().files.contains_key(path)
    }

    fn same_file(&self, a: &Path, b: &Path) -> bool {
        a == b && self.is_file(a)
    }
}
