//! Per-entity-type registry of slug attribute configurations.
//!
//! Each entity type owns one [`SlugRegistry`] mapping attribute names to
//! fully populated entries (source extractor, preprocessor, compiled rules).
//! Registration happens once during type setup; the orchestrator then reads
//! entries in registration order on every update.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::record::SlugRecord;
use crate::slug::{default_preprocessor, Preprocessor, SlugError, SlugRules};
use crate::{DEFAULT_ALLOW_UNDERSCORES, DEFAULT_ATTRIBUTE, DEFAULT_SEPARATOR};

/// Error type for registration
#[derive(Debug, Clone)]
pub enum RegistryError {
    /// `register` was called without a source extractor.
    MissingSource { attribute: String },
    /// The separator token could not be compiled into rules.
    BadRules { attribute: String, cause: SlugError },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::MissingSource { attribute } => {
                write!(f, "No slug source given for attribute '{}'", attribute)
            }
            RegistryError::BadRules { attribute, cause } => {
                write!(f, "Invalid slug rules for attribute '{}': {}", attribute, cause)
            }
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::BadRules { cause, .. } => Some(cause),
            RegistryError::MissingSource { .. } => None,
        }
    }
}

/// Trait for slug source extractors
///
/// A source extractor pulls the raw value to slugify out of an entity
/// instance. Any `Fn(&R) -> String` closure or fn item works.
pub trait SlugSource<R>: Send + Sync {
    fn extract(&self, record: &R) -> String;
}

impl<R, F> SlugSource<R> for F
where
    F: Fn(&R) -> String + Send + Sync,
{
    fn extract(&self, record: &R) -> String {
        self(record)
    }
}

/// One registered slug attribute configuration.
///
/// An entry is either fully populated by [`SlugRegistry::register`] or the
/// empty default returned for unregistered attributes; nothing in between.
/// Cloning shares the stateless callables and duplicates everything else.
pub struct SlugEntry<R> {
    source: Option<Arc<dyn SlugSource<R>>>,
    preprocessor: Arc<dyn Preprocessor>,
    rules: Option<SlugRules>,
}

impl<R> SlugEntry<R> {
    /// Whether this entry came from a `register` call.
    pub fn is_registered(&self) -> bool {
        self.source.is_some()
    }

    /// The source extractor, `None` on an empty entry.
    pub fn source(&self) -> Option<&dyn SlugSource<R>> {
        self.source.as_deref()
    }

    /// The preprocessor applied before normalization.
    pub fn preprocessor(&self) -> &dyn Preprocessor {
        &*self.preprocessor
    }

    /// The compiled normalization rules, `None` on an empty entry.
    pub fn rules(&self) -> Option<&SlugRules> {
        self.rules.as_ref()
    }

    /// The separator token (the default on an empty entry).
    pub fn separator(&self) -> &str {
        self.rules
            .as_ref()
            .map_or(DEFAULT_SEPARATOR, |rules| rules.separator())
    }

    /// The underscore policy (the default on an empty entry).
    pub fn allow_underscores(&self) -> bool {
        self.rules
            .as_ref()
            .map_or(DEFAULT_ALLOW_UNDERSCORES, |rules| rules.allow_underscores())
    }
}

impl<R> Default for SlugEntry<R> {
    fn default() -> Self {
        Self {
            source: None,
            preprocessor: default_preprocessor(),
            rules: None,
        }
    }
}

impl<R> Clone for SlugEntry<R> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            preprocessor: Arc::clone(&self.preprocessor),
            rules: self.rules.clone(),
        }
    }
}

impl<R> fmt::Debug for SlugEntry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlugEntry")
            .field("registered", &self.is_registered())
            .field("separator", &self.separator())
            .field("allow_underscores", &self.allow_underscores())
            .finish()
    }
}

/// Builder for the arguments to [`SlugRegistry::register`].
///
/// Only the source is required; everything else falls back to the crate
/// defaults (attribute `"slug"`, pass-through preprocessor, separator `"-"`,
/// underscores folded into the separator).
///
/// # Example
///
/// ```ignore
/// use sluggable::{SlugOptions, SlugRegistry};
///
/// let mut registry = SlugRegistry::new();
/// registry.register(
///     SlugOptions::new()
///         .source(|article: &Article| article.title.clone())
///         .preprocessor(sluggable::lowercase),
/// )?;
/// ```
pub struct SlugOptions<R> {
    attribute: Option<String>,
    source: Option<Arc<dyn SlugSource<R>>>,
    preprocessor: Option<Arc<dyn Preprocessor>>,
    separator: Option<String>,
    allow_underscores: Option<bool>,
}

impl<R> SlugOptions<R> {
    pub fn new() -> Self {
        Self {
            attribute: None,
            source: None,
            preprocessor: None,
            separator: None,
            allow_underscores: None,
        }
    }

    /// Name the slug attribute (default `"slug"`).
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.attribute = Some(name.into());
        self
    }

    /// Supply the source extractor callable.
    pub fn source<S>(mut self, source: S) -> Self
    where
        S: SlugSource<R> + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    /// Preprocess the source value before normalization.
    pub fn preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: Preprocessor + 'static,
    {
        self.preprocessor = Some(Arc::new(preprocessor));
        self
    }

    /// Separator token substituted for runs of invalid characters.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Whether underscores survive normalization.
    pub fn allow_underscores(mut self, allow: bool) -> Self {
        self.allow_underscores = Some(allow);
        self
    }
}

impl<R: SlugRecord + 'static> SlugOptions<R> {
    /// Source the slug from a named record field, read through the record's
    /// own accessor. Unset fields read as the empty string.
    pub fn source_field(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.source(move |record: &R| record.field(&name).unwrap_or_default())
    }
}

impl<R> Default for SlugOptions<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of slug configurations for one entity type.
///
/// Entries keep their registration order; the orchestrator relies on it.
/// The registry is meant to be built during type setup and treated as
/// read-only once updates start flowing.
pub struct SlugRegistry<R> {
    entries: IndexMap<String, SlugEntry<R>>,
}

impl<R> SlugRegistry<R> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Register a slug attribute, creating or wholesale-replacing its entry.
    ///
    /// Returns the canonical attribute name so the caller can attach
    /// validations or lookups to it.
    ///
    /// # Errors
    ///
    /// `RegistryError::MissingSource` when no source extractor was supplied,
    /// `RegistryError::BadRules` for an unusable separator token. The
    /// registry is left unmodified on error.
    pub fn register(&mut self, options: SlugOptions<R>) -> Result<String, RegistryError> {
        let attribute = options
            .attribute
            .unwrap_or_else(|| DEFAULT_ATTRIBUTE.to_string());

        let source = options
            .source
            .ok_or_else(|| RegistryError::MissingSource {
                attribute: attribute.clone(),
            })?;

        let separator = options
            .separator
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string());
        let allow_underscores = options
            .allow_underscores
            .unwrap_or(DEFAULT_ALLOW_UNDERSCORES);

        let rules = SlugRules::new(&separator, allow_underscores).map_err(|cause| {
            RegistryError::BadRules {
                attribute: attribute.clone(),
                cause,
            }
        })?;

        let preprocessor = options.preprocessor.unwrap_or_else(default_preprocessor);

        tracing::debug!(
            "Registered slug attribute '{}' (separator '{}', underscores {})",
            attribute,
            separator,
            if allow_underscores { "kept" } else { "folded" },
        );

        self.entries.insert(
            attribute.clone(),
            SlugEntry {
                source: Some(source),
                preprocessor,
                rules: Some(rules),
            },
        );

        Ok(attribute)
    }

    /// Get-or-default lookup: the entry for `attribute`, or an empty default
    /// entry when nothing is registered under that name. Never inserts.
    pub fn entry(&self, attribute: &str) -> SlugEntry<R> {
        self.entries
            .get(attribute)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether an attribute is registered.
    pub fn is_registered(&self, attribute: &str) -> bool {
        self.entries.contains_key(attribute)
    }

    /// Install an independent duplicate of every entry in `other`.
    ///
    /// Used when a subtype inherits its supertype's configuration: after the
    /// copy, re-registering on either registry leaves the other untouched.
    /// The stateless callables themselves are shared.
    pub fn copy_from(&mut self, other: &SlugRegistry<R>) {
        for (attribute, entry) in &other.entries {
            self.entries.insert(attribute.clone(), entry.clone());
        }
    }

    /// Iterate entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SlugEntry<R>)> {
        self.entries
            .iter()
            .map(|(attribute, entry)| (attribute.as_str(), entry))
    }

    /// Registered attribute names in registration order.
    pub fn attributes(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<R> Default for SlugRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for SlugRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}
