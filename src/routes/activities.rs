// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity submission and listing routes.

use crate::error::Result;
use crate::models::Activity;
use crate::services::ActivityRequest;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Activity routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/activities",
        post(create_activity).get(get_activities),
    )
}

/// Submit a new activity.
///
/// Persists the activity and queues it for AI analysis; the response never
/// waits on the recommendation pipeline.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ActivityRequest>,
) -> Result<(StatusCode, Json<Activity>)> {
    let activity = state.activity_service.submit(request).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

#[derive(Deserialize)]
struct ActivitiesQuery {
    user_id: String,
}

/// List a user's activities, newest first.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ActivitiesQuery>,
) -> Result<Json<Vec<Activity>>> {
    let activities = state.activity_service.list_for_user(&query.user_id).await?;
    Ok(Json(activities))
}
