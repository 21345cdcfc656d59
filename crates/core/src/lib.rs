//! # Mergington Core
//!
//! Activity catalog for the Mergington High School signup service: the
//! activity model, SQLite-backed storage and the sample-data seeder.
//!
//! ## Architecture
//!
//! - `models` - The `Activity` record
//! - `state/` - `CatalogDb` (connection + migrations) and `ActivityManager`
//! - `seed/` - Bundled sample activities and `seed_catalog`
//! - `error` - `CatalogError`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mergington_core::seed::{seed_catalog, SeedMode};
//! use mergington_core::state::{ActivityManager, CatalogDb, DEFAULT_DB_PATH};
//!
//! let db = CatalogDb::open_at(DEFAULT_DB_PATH)?;
//! let manager = ActivityManager::new(&db);
//! seed_catalog(&manager, SeedMode::IfEmpty)?;
//! manager.add_participant("Chess Club", "new@mergington.edu")?;
//! ```

pub mod error;
pub mod models;
pub mod seed;
pub mod state;

pub use error::{CatalogError, CatalogResult};
pub use models::Activity;
