// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation read routes.
//!
//! Recommendations are generated asynchronously; a 404 for a fresh
//! activity usually just means the worker hasn't gotten to it yet.

use crate::error::{AppError, Result};
use crate::models::Recommendation;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Recommendation routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/recommendations/user/{user_id}",
            get(get_user_recommendations),
        )
        .route(
            "/api/recommendations/activity/{activity_id}",
            get(get_activity_recommendation),
        )
}

/// All recommendations for a user, newest first.
async fn get_user_recommendations(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Recommendation>>> {
    let recommendations = state.db.get_recommendations_for_user(&user_id).await?;
    Ok(Json(recommendations))
}

/// The recommendation generated for one activity.
async fn get_activity_recommendation(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<String>,
) -> Result<Json<Recommendation>> {
    let recommendation = state
        .db
        .get_recommendation_for_activity(&activity_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Recommendation for activity {}", activity_id))
        })?;
    Ok(Json(recommendation))
}
