//! The parsed generator configuration.
//!
//! A [`Configuration`] is an immutable tree of scalars, sequences and
//! mappings. It is handed by reference to the renderer and to every project
//! type; nothing in the core mutates it after parsing.

use serde_json::Value;

use crate::domain::error::ConfigError;

/// Keys consulted, in order, for the generator-type selector.
pub const PROJECT_TYPE_KEYS: [&str; 2] = ["generator.type", "type"];

/// Immutable, arbitrarily nested configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    root: Value,
}

impl Configuration {
    /// Parse a YAML document. The root must be a mapping.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let root: Value = serde_yaml::from_str(source).map_err(|e| ConfigError::Parse {
            detail: e.to_string(),
        })?;
        Self::from_value(root)
    }

    /// Wrap an already-built tree.
    pub fn from_value(root: Value) -> Result<Self, ConfigError> {
        match root {
            Value::Object(_) => Ok(Self { root }),
            Value::Null => Err(ConfigError::Empty),
            other => Err(ConfigError::NotAMapping {
                found: kind_name(&other),
            }),
        }
    }

    /// The whole tree, as exposed to templates.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Look up a dotted path such as `supported_paths.src.enable`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.root, |value, segment| value.get(segment))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// String value at `path`, if it is a string.
    pub fn str_at(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Truthiness of the value at `path`; missing keys are `false`.
    pub fn flag(&self, path: &str) -> bool {
        self.get(path).is_some_and(is_truthy)
    }

    /// The generator-type selector used to pick a project type.
    pub fn project_type(&self) -> Result<&str, ConfigError> {
        PROJECT_TYPE_KEYS
            .iter()
            .find_map(|key| self.str_at(key))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingProjectType)
    }
}

/// Template-style truthiness: null, `false`, zero, and empty strings or
/// collections are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
