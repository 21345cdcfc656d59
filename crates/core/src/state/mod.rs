pub mod activities;
pub mod db;

pub use activities::ActivityManager;
pub use db::{CatalogDb, DEFAULT_DB_PATH};
