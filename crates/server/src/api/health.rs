use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use super::SharedState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub database: String,
    pub overall: String,
}

/// Report whether the catalog database answers
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthStatus),
        (status = 503, description = "Catalog database is unavailable", body = HealthStatus)
    )
)]
pub async fn health_check(State(state): State<SharedState>) -> (StatusCode, Json<HealthStatus>) {
    let database = match state.db.health_check() {
        Ok(_) => "healthy".to_string(),
        Err(e) => {
            tracing::warn!("Catalog health check failed: {:#}", e);
            format!("unhealthy: {}", e)
        }
    };

    let (status, overall) = if database == "healthy" {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status,
        Json(HealthStatus {
            database,
            overall: overall.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AppState;
    use mergington_core::state::CatalogDb;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unusable_database_reports_unavailable() {
        let db = Arc::new(CatalogDb::open_in_memory().unwrap());

        // A panic while holding the lock poisons the shared connection
        let conn = db.connection();
        let _ = std::thread::spawn(move || {
            let _guard = conn.lock().unwrap();
            panic!("poison catalog connection");
        })
        .join();

        let state = Arc::new(AppState { db });
        let (status, Json(body)) = health_check(State(state)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.overall, "unhealthy");
        assert!(body.database.starts_with("unhealthy: "));
    }
}
