//! Declarative slug configuration loader.
//!
//! Covers the common case where slug sources are plain field reads: a YAML
//! document lists the slug attributes for an entity type and is applied to a
//! registry in one call. Custom extractor or preprocessor callables stay in
//! code via [`SlugOptions`](crate::SlugOptions).
//!
//! ```yaml
//! slugs:
//!   - source: title
//!     preprocessor: lowercase
//!   - attribute: code_slug
//!     source: code
//!     separator: "_"
//!     allow_underscores: true
//! mode: always_regenerate
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::record::SlugRecord;
use crate::registry::{SlugOptions, SlugRegistry};
use crate::slug::{lowercase, stringify, uppercase};
use crate::update::{SlugUpdater, SourceMode};

/// Named built-in preprocessors available to YAML definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreprocessorKind {
    /// Pass the source value through unchanged (the default).
    Stringify,
    Lowercase,
    Uppercase,
}

impl PreprocessorKind {
    fn callable(self) -> fn(String) -> String {
        match self {
            PreprocessorKind::Stringify => stringify,
            PreprocessorKind::Lowercase => lowercase,
            PreprocessorKind::Uppercase => uppercase,
        }
    }
}

/// One slug attribute definition from YAML.
///
/// `source` names the record field the slug derives from; everything else is
/// optional and falls back to the crate defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugFieldDef {
    /// Slug attribute name (default `"slug"`)
    #[serde(default)]
    pub attribute: Option<String>,

    /// Record field the slug derives from
    pub source: String,

    /// Built-in preprocessor to apply before normalization
    #[serde(default)]
    pub preprocessor: Option<PreprocessorKind>,

    /// Separator token
    #[serde(default)]
    pub separator: Option<String>,

    /// Whether underscores survive normalization
    #[serde(default)]
    pub allow_underscores: Option<bool>,
}

/// Slug configuration for one entity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugConfig {
    /// Slug attribute definitions, applied in listed order
    pub slugs: Vec<SlugFieldDef>,

    /// Sourcing strategy for the updater (default: always regenerate)
    #[serde(default)]
    pub mode: Option<SourceMode>,
}

impl SlugConfig {
    /// Load slug configuration from a YAML file.
    ///
    /// # Errors
    /// Returns error if the file doesn't exist or has invalid format
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read slug config {}: {}", path.display(), e))?;

        Self::from_yaml_str(&contents)
    }

    /// Parse slug configuration from a YAML string.
    pub fn from_yaml_str(contents: &str) -> Result<Self, String> {
        serde_yaml::from_str(contents).map_err(|e| format!("Failed to parse slug config: {}", e))
    }

    /// Register every definition into `registry`, in listed order.
    ///
    /// Returns the canonical attribute names registered.
    pub fn apply<R>(&self, registry: &mut SlugRegistry<R>) -> Result<Vec<String>, String>
    where
        R: SlugRecord + 'static,
    {
        let mut registered = Vec::with_capacity(self.slugs.len());

        for def in &self.slugs {
            let mut options = SlugOptions::new().source_field(&def.source);

            if let Some(attribute) = &def.attribute {
                options = options.attribute(attribute);
            }
            if let Some(kind) = def.preprocessor {
                options = options.preprocessor(kind.callable());
            }
            if let Some(separator) = &def.separator {
                options = options.separator(separator);
            }
            if let Some(allow) = def.allow_underscores {
                options = options.allow_underscores(allow);
            }

            let attribute = registry.register(options).map_err(|e| {
                format!("Failed to register slug for source '{}': {}", def.source, e)
            })?;
            registered.push(attribute);
        }

        Ok(registered)
    }

    /// Build an updater using the configured sourcing strategy.
    pub fn updater(&self) -> SlugUpdater {
        SlugUpdater::with_mode(self.mode.unwrap_or_default())
    }
}
