//! Update orchestration: computing candidate slugs and emitting changes.
//!
//! Runs at entity lifecycle points (after create, after update, or via the
//! manual trigger). For each registered attribute the orchestrator extracts
//! the raw source value, normalizes it, and hands changed values to the
//! collaborator's single-column persistence callback. Unchanged values
//! produce no persistence call at all.

use serde::{Deserialize, Serialize};

use crate::record::SlugRecord;
use crate::registry::SlugRegistry;
use crate::DEFAULT_ATTRIBUTE;

/// Strategy for choosing the raw value to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// Always extract via the registered source callable and recompute,
    /// regardless of the attribute's current value. The default.
    #[default]
    AlwaysRegenerate,
    /// When the attribute already holds a non-empty value, re-normalize that
    /// value instead of the source field. Lets callers hand-set a slug
    /// before a write and have it cleaned up rather than overwritten.
    GenerateIfEmpty,
}

/// Orchestrates slug updates for one entity instance at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlugUpdater {
    mode: SourceMode,
}

impl SlugUpdater {
    /// Updater with the default [`SourceMode::AlwaysRegenerate`] strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updater with an explicit sourcing strategy.
    pub fn with_mode(mode: SourceMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    /// Compute and apply slug values for every registered attribute.
    ///
    /// Entries are visited in registration order. A candidate equal to the
    /// attribute's current value is skipped without touching the record or
    /// the persistence callback. Otherwise the record is updated locally and
    /// `persist(attribute, candidate)` is invoked for the single changed
    /// column. Persistence errors propagate unmodified and stop the run.
    ///
    /// Returns the attributes actually changed.
    pub fn run<R, P, E>(
        &self,
        record: &mut R,
        registry: &SlugRegistry<R>,
        mut persist: P,
    ) -> Result<Vec<String>, E>
    where
        R: SlugRecord,
        P: FnMut(&str, &str) -> Result<(), E>,
    {
        let mut changed = Vec::new();

        for (attribute, entry) in registry.iter() {
            // Only fully populated entries reach the registry map.
            let (Some(source), Some(rules)) = (entry.source(), entry.rules()) else {
                continue;
            };

            let current = record.field(attribute).unwrap_or_default();

            let raw = match self.mode {
                SourceMode::GenerateIfEmpty if !current.is_empty() => current.clone(),
                _ => source.extract(record),
            };

            let candidate = rules.apply(&raw, entry.preprocessor());

            if candidate == current {
                tracing::trace!("Slug '{}' already '{}', skipping", attribute, candidate);
                continue;
            }

            record.set_field(attribute, &candidate);
            persist(attribute, &candidate)?;

            tracing::debug!("Slug '{}' set to '{}'", attribute, candidate);
            changed.push(attribute.to_string());
        }

        Ok(changed)
    }
}

/// Clear a slug attribute on the record, forcing regeneration on the next
/// run. Does not persist anything. `attribute` defaults to `"slug"`.
pub fn reset<R: SlugRecord>(record: &mut R, attribute: Option<&str>) {
    record.set_field(attribute.unwrap_or(DEFAULT_ATTRIBUTE), "");
}
