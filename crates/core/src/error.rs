//! Catalog error taxonomy.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Activity not found")]
    ActivityNotFound(String),

    #[error("Student already signed up")]
    AlreadySignedUp { activity: String, email: String },

    #[error("Student is not signed up for this activity")]
    NotSignedUp { activity: String, email: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Lock error: {0}")]
    Lock(String),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
