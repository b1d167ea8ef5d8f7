//! Record accessor contract for slug-bearing entities.
//!
//! The orchestrator never talks to a concrete entity representation; it goes
//! through [`SlugRecord`], which the persistence collaborator implements for
//! its own types. [`JsonRecord`] is a ready-made implementation over a JSON
//! object, used by the declarative config layer and handy in tests.

use serde_json::{Map, Value};

/// Named string-attribute access on an entity instance.
///
/// `field` reads the current value of a named attribute (`None` when unset
/// or null), `set_field` writes it. Both slug attributes and the source
/// fields they derive from are reachable through this interface.
///
/// # Example
///
/// ```ignore
/// use sluggable::SlugRecord;
///
/// struct Article {
///     title: String,
///     slug: String,
/// }
///
/// impl SlugRecord for Article {
///     fn field(&self, name: &str) -> Option<String> {
///         match name {
///             "title" => Some(self.title.clone()),
///             "slug" if !self.slug.is_empty() => Some(self.slug.clone()),
///             _ => None,
///         }
///     }
///
///     fn set_field(&mut self, name: &str, value: &str) {
///         if name == "slug" {
///             self.slug = value.to_string();
///         }
///     }
/// }
/// ```
pub trait SlugRecord {
    /// Read a named attribute as a string, `None` when unset.
    fn field(&self, name: &str) -> Option<String>;

    /// Write a named attribute.
    fn set_field(&mut self, name: &str, value: &str);
}

/// Entity instance backed by a JSON object.
///
/// Strings pass through as-is; numbers and booleans stringify; null and
/// missing keys read as unset. Nested objects and arrays stringify to their
/// JSON text, mirroring how entity dictionaries flatten non-scalar values.
#[derive(Debug, Clone, Default)]
pub struct JsonRecord {
    values: Map<String, Value>,
}

impl JsonRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON value; non-object values yield an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(values) => Self { values },
            _ => Self::default(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// The underlying JSON object.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}

impl SlugRecord for JsonRecord {
    fn field(&self, name: &str) -> Option<String> {
        match self.values.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    fn set_field(&mut self, name: &str, value: &str) {
        self.values
            .insert(name.to_string(), Value::String(value.to_string()));
    }
}
