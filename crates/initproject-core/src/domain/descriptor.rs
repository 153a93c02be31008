use serde::Serialize;

/// A project type as shown by `--list-types`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectTypeDescriptor {
    pub name: String,
    pub short_description: String,
}

impl ProjectTypeDescriptor {
    pub fn new(name: impl Into<String>, short_description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_description: short_description.into(),
        }
    }
}
