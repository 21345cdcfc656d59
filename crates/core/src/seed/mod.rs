//! # Catalog Seeding
//!
//! Sample activities bundled at compile time, loaded into the catalog either
//! on first server start or on demand from the `seed` command.

use anyhow::{Context, Result};

use crate::models::Activity;
use crate::state::ActivityManager;

/// Sample activity catalog
pub const SAMPLE_ACTIVITIES: &str = include_str!("defaults/activities.json");

/// How [`seed_catalog`] treats existing data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Insert only when the catalog holds no activities
    #[default]
    IfEmpty,
    /// Delete every activity first, then insert the samples
    Reset,
}

/// Parse the bundled sample activities
pub fn sample_activities() -> Result<Vec<Activity>> {
    serde_json::from_str(SAMPLE_ACTIVITIES).context("Failed to parse bundled sample activities")
}

/// Load the sample activities into the catalog.
///
/// Returns how many activities were inserted, which is 0 when
/// [`SeedMode::IfEmpty`] finds an already populated catalog.
pub fn seed_catalog(manager: &ActivityManager, mode: SeedMode) -> Result<usize> {
    let activities = sample_activities()?;

    let inserted = match mode {
        SeedMode::IfEmpty => manager.seed_if_empty(&activities),
        SeedMode::Reset => manager.clear_and_seed(&activities),
    }
    .context("Failed to seed activity catalog")?;

    if inserted > 0 {
        tracing::info!("Seeded {} sample activities ({:?})", inserted, mode);
    }

    Ok(inserted)
}
