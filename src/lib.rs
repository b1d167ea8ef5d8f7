//! # Sluggable: Slug Derivation for Persistent Entities
//!
//! Sluggable derives and maintains URL-safe "slug" identifiers for
//! persistent entities, computed from configurable source fields. Each
//! entity type registers one or more slug attributes, each with its own
//! source extractor, preprocessor, separator token, and underscore policy;
//! on every write the updater recomputes candidates and persists only the
//! values that actually changed.
//!
//! ## Features
//!
//! - **Pure normalization rules**: deterministic, idempotent slug transform
//!   with a literal (escaped) separator token and Unicode-aware word class
//! - **Per-type attribute registry**: ordered configuration entries, built
//!   once at type-definition time, copyable into subtype registries
//! - **Change-detecting updater**: emits single-column persistence calls
//!   only for attributes whose computed value differs from the current one
//! - **Record-agnostic**: entities are reached through a get/set-by-name
//!   accessor trait, with a JSON-backed implementation included
//! - **Declarative configuration**: YAML definitions for field-sourced slugs
//!
//! ## Example
//!
//! ```yaml
//! slugs:
//!   - source: title
//!     preprocessor: lowercase
//!   - attribute: code_slug
//!     source: code
//!     separator: "_"
//!     allow_underscores: true
//! ```
//!
//! ```ignore
//! use sluggable::{JsonRecord, SlugConfig, SlugRegistry};
//!
//! let config = SlugConfig::from_yaml_file("config/slugs.yaml")?;
//! let mut registry: SlugRegistry<JsonRecord> = SlugRegistry::new();
//! config.apply(&mut registry)?;
//!
//! let changed = sluggable::update_slugs(&mut record, &registry, |attribute, value| {
//!     db.update_column(attribute, value)
//! })?;
//! ```

// Core modules
pub mod config;
pub mod record;
pub mod registry;
pub mod slug;
pub mod update;

// Re-export key types
pub use config::{PreprocessorKind, SlugConfig, SlugFieldDef};
pub use record::{JsonRecord, SlugRecord};
pub use registry::{RegistryError, SlugEntry, SlugOptions, SlugRegistry, SlugSource};
pub use slug::{lowercase, slugify, stringify, uppercase, Preprocessor, SlugError, SlugRules};
pub use update::{reset, SlugUpdater, SourceMode};

/// Default slug attribute name.
pub const DEFAULT_ATTRIBUTE: &str = "slug";

/// Default separator token.
pub const DEFAULT_SEPARATOR: &str = "-";

/// Default underscore policy: underscores fold into the separator unless a
/// registration opts in to keeping them.
pub const DEFAULT_ALLOW_UNDERSCORES: bool = false;

/// Manually trigger a slug update outside the normal lifecycle hooks.
///
/// Runs the default updater over every registered attribute and reports
/// whether any value changed. Persistence errors propagate unmodified.
pub fn update_slugs<R, P, E>(
    record: &mut R,
    registry: &SlugRegistry<R>,
    persist: P,
) -> Result<bool, E>
where
    R: SlugRecord,
    P: FnMut(&str, &str) -> Result<(), E>,
{
    let changed = SlugUpdater::new().run(record, registry, persist)?;
    Ok(!changed.is_empty())
}
