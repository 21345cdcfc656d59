//! HTTP surface: router, shared state and the OpenAPI document.

use axum::{routing::get, Json, Router};
use mergington_core::state::CatalogDb;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::assets;
use crate::error::ErrorBody;

pub mod activities;
pub mod health;

/// Application state
pub struct AppState {
    /// Catalog store, opened once at startup
    pub db: Arc<CatalogDb>,
}

pub type SharedState = Arc<AppState>;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mergington High School API",
        version = "1.0.0",
        description = "API for viewing and signing up for extracurricular activities"
    ),
    paths(
        activities::list_activities,
        activities::signup_for_activity,
        activities::remove_participant,
        health::health_check
    ),
    components(schemas(
        activities::ActivityResponse,
        activities::MessageResponse,
        ErrorBody,
        health::HealthStatus
    )),
    tags(
        (name = "activities", description = "Activity catalog and signups"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(assets::root))
        .route("/static/*path", get(assets::serve_static))
        .merge(activities::activity_routes())
        .route("/health", get(health::health_check))
        .route("/openapi.json", get(serve_openapi))
        .with_state(state)
}
