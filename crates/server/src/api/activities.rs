//! # Activities API
//!
//! Catalog listing plus signup and removal of participants.

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use mergington_core::state::ActivityManager;
use mergington_core::Activity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

use super::SharedState;
use crate::error::{ApiError, ErrorBody};

/// Activity as listed under its name
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityResponse {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self {
            description: activity.description,
            schedule: activity.schedule,
            max_participants: activity.max_participants,
            participants: activity.participants,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ParticipantQuery {
    /// Student email
    pub email: String,
}

pub fn activity_routes() -> Router<SharedState> {
    Router::new()
        .route("/activities", get(list_activities))
        .route("/activities/:activity_name/signup", post(signup_for_activity))
        .route("/activities/:activity_name/remove", delete(remove_participant))
}

/// List every activity keyed by name
#[utoipa::path(
    get,
    path = "/activities",
    tag = "activities",
    responses(
        (status = 200, description = "All activities keyed by name", body = BTreeMap<String, ActivityResponse>)
    )
)]
pub async fn list_activities(
    State(state): State<SharedState>,
) -> Result<Json<BTreeMap<String, ActivityResponse>>, ApiError> {
    let manager = ActivityManager::new(&state.db);

    let catalog = manager
        .list_all()?
        .into_iter()
        .map(|activity| (activity.name.clone(), ActivityResponse::from(activity)))
        .collect();

    Ok(Json(catalog))
}

/// Sign a student up for an activity
#[utoipa::path(
    post,
    path = "/activities/{activity_name}/signup",
    tag = "activities",
    params(
        ("activity_name" = String, Path, description = "Activity name"),
        ParticipantQuery
    ),
    responses(
        (status = 200, description = "Student signed up", body = MessageResponse),
        (status = 400, description = "Student already signed up", body = ErrorBody),
        (status = 404, description = "Activity not found", body = ErrorBody)
    )
)]
pub async fn signup_for_activity(
    State(state): State<SharedState>,
    Path(activity_name): Path<String>,
    Query(query): Query<ParticipantQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let manager = ActivityManager::new(&state.db);
    manager.add_participant(&activity_name, &query.email)?;

    tracing::info!("Signed up {} for {}", query.email, activity_name);
    Ok(Json(MessageResponse {
        message: format!("Signed up {} for {}", query.email, activity_name),
    }))
}

/// Remove a student from an activity
#[utoipa::path(
    delete,
    path = "/activities/{activity_name}/remove",
    tag = "activities",
    params(
        ("activity_name" = String, Path, description = "Activity name"),
        ParticipantQuery
    ),
    responses(
        (status = 200, description = "Student removed", body = MessageResponse),
        (status = 400, description = "Student is not signed up", body = ErrorBody),
        (status = 404, description = "Activity not found", body = ErrorBody)
    )
)]
pub async fn remove_participant(
    State(state): State<SharedState>,
    Path(activity_name): Path<String>,
    Query(query): Query<ParticipantQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let manager = ActivityManager::new(&state.db);
    manager.remove_participant(&activity_name, &query.email)?;

    tracing::info!("Removed {} from {}", query.email, activity_name);
    Ok(Json(MessageResponse {
        message: format!("Removed {} from {}", query.email, activity_name),
    }))
}
