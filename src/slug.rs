//! Slug normalization rules and the pure transform they drive.
//!
//! This module turns arbitrary source strings into clean, URL-safe slugs.
//! It has no state beyond the compiled rules and no knowledge of records or
//! registries.

use std::fmt;
use std::sync::Arc;

use regex::{NoExpand, Regex};

/// Error type for building slug rules
#[derive(Debug, Clone)]
pub enum SlugError {
    EmptySeparator,
    Pattern(String),
}

impl fmt::Display for SlugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlugError::EmptySeparator => write!(f, "Separator must be a non-empty string"),
            SlugError::Pattern(msg) => write!(f, "Invalid separator pattern: {}", msg),
        }
    }
}

impl std::error::Error for SlugError {}

/// Trait for string preprocessors applied before normalization
///
/// Preprocessors run on an owned copy of the source value, so the original
/// is never mutated. Any `Fn(String) -> String` closure or fn item works.
pub trait Preprocessor: Send + Sync {
    fn apply(&self, input: String) -> String;
}

impl<F> Preprocessor for F
where
    F: Fn(String) -> String + Send + Sync,
{
    fn apply(&self, input: String) -> String {
        self(input)
    }
}

/// Pass the source value through unchanged (the default preprocessor).
pub fn stringify(input: String) -> String {
    input
}

/// Lowercase the source value before normalization.
pub fn lowercase(input: String) -> String {
    input.to_lowercase()
}

/// Uppercase the source value before normalization.
pub fn uppercase(input: String) -> String {
    input.to_uppercase()
}

/// Shared handle to the default preprocessor.
pub(crate) fn default_preprocessor() -> Arc<dyn Preprocessor> {
    Arc::new(stringify)
}

/// Compiled normalization rules for one slug attribute.
///
/// The separator token is matched literally (it is escaped before being
/// compiled), so tokens like `"."` or `"+"` are safe. "Word characters"
/// are Unicode-aware `\w`: Unicode letters, digits, and `_`. Input such as
/// `"Ünïcode Ok"` therefore keeps its letters and normalizes to
/// `"Ünïcode-Ok"` rather than dropping them.
#[derive(Debug, Clone)]
pub struct SlugRules {
    separator: String,
    allow_underscores: bool,
    invalid_runs: Regex,
    repeated_separators: Regex,
}

impl SlugRules {
    /// Compile rules for the given separator token and underscore policy.
    ///
    /// # Errors
    ///
    /// Returns `SlugError::EmptySeparator` for an empty token. Pattern
    /// compilation failures surface as `SlugError::Pattern`.
    pub fn new(separator: &str, allow_underscores: bool) -> Result<Self, SlugError> {
        if separator.is_empty() {
            return Err(SlugError::EmptySeparator);
        }

        let escaped = regex::escape(separator);
        let invalid_runs = Regex::new(&format!(r"[^\w{}]+", escaped))
            .map_err(|e| SlugError::Pattern(e.to_string()))?;
        let repeated_separators = Regex::new(&format!(r"(?:{}){{2,}}", escaped))
            .map_err(|e| SlugError::Pattern(e.to_string()))?;

        Ok(Self {
            separator: separator.to_string(),
            allow_underscores,
            invalid_runs,
            repeated_separators,
        })
    }

    /// The separator token these rules were compiled with.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Whether underscores survive normalization.
    pub fn allow_underscores(&self) -> bool {
        self.allow_underscores
    }

    /// Normalize `raw` into a slug.
    ///
    /// Steps, in order: preprocess an owned copy, fold runs of invalid
    /// characters into the separator, fold underscores into the separator
    /// unless allowed, collapse repeated separators, then strip one leading
    /// and one trailing separator. The result may be empty (e.g. input made
    /// entirely of invalid characters). Applying the same rules to their own
    /// output is a no-op.
    pub fn apply(&self, raw: &str, preprocessor: &dyn Preprocessor) -> String {
        let slug = preprocessor.apply(raw.to_string());

        let slug = self
            .invalid_runs
            .replace_all(&slug, NoExpand(&self.separator))
            .into_owned();

        let slug = if self.allow_underscores {
            slug
        } else {
            slug.replace('_', &self.separator)
        };

        let slug = self
            .repeated_separators
            .replace_all(&slug, NoExpand(&self.separator))
            .into_owned();

        let trimmed = slug.strip_prefix(self.separator.as_str()).unwrap_or(&slug);
        let trimmed = trimmed
            .strip_suffix(self.separator.as_str())
            .unwrap_or(trimmed);

        trimmed.to_string()
    }
}

/// Normalize `raw` with the identity preprocessor.
///
/// Convenience wrapper for one-off use; compiles the rules on every call.
/// Registries compile rules once per entry instead.
///
/// # Errors
///
/// Fails only on a bad separator token, never on the input string.
pub fn slugify(raw: &str, separator: &str, allow_underscores: bool) -> Result<String, SlugError> {
    let rules = SlugRules::new(separator, allow_underscores)?;
    Ok(rules.apply(raw, &stringify))
}
