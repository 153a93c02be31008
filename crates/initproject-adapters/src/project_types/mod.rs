//! Built-in project types.

pub mod licenses;
pub mod native;

use initproject_core::application::ProjectTypeRegistry;

pub use native::NativeProject;

/// Registry holding every project type that ships with initproject.
pub fn builtin_registry() -> ProjectTypeRegistry {
    ProjectTypeRegistry::new().with(native::NAME, || Ok(Box::new(NativeProject::new())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_is_registered() {
        let registry = builtin_registry();
        let listed: Vec<_> = registry.list_available().collect();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "native");
        assert_eq!(
            listed[0].short_description,
            "Frogtoss Native Project Standards-compliant project"
        );
    }
}
