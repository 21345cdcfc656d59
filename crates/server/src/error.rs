use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mergington_core::CatalogError;
use serde::Serialize;
use utoipa::ToSchema;

/// Errors returned by the HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// Unknown activity name
    NotFound(String),
    /// Signup for an email that is already registered
    Conflict(String),
    /// Removal of an email that is not registered
    InvalidState(String),
    Internal(String),
}

/// Error body, `{"detail": "..."}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ActivityNotFound(_) => ApiError::NotFound(err.to_string()),
            CatalogError::AlreadySignedUp { .. } => ApiError::Conflict(err.to_string()),
            CatalogError::NotSignedUp { .. } => ApiError::InvalidState(err.to_string()),
            CatalogError::Storage(_) | CatalogError::Lock(_) => {
                tracing::error!("Catalog failure: {}", err);
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InvalidState(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_errors_map_to_client_statuses() {
        let cases = [
            (
                CatalogError::ActivityNotFound("Knitting".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                CatalogError::AlreadySignedUp {
                    activity: "Chess Club".into(),
                    email: "a@x.edu".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                CatalogError::NotSignedUp {
                    activity: "Chess Club".into(),
                    email: "a@x.edu".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                CatalogError::Lock("poisoned".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }
}
