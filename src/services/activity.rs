// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity ingestion service.
//!
//! Handles the submission workflow:
//! 1. Validate the request fields
//! 2. Validate the user against the user service
//! 3. Persist the activity
//! 4. Publish the activity event for the recommendation worker
//!
//! The caller never waits on AI processing; step 4 is a non-blocking
//! publish whose failure handling is a configuration decision.

use crate::bus::EventBus;
use crate::config::PublishFailurePolicy;
use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityEvent, ActivityType};
use crate::services::users::UserValidationClient;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Activity submission payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityRequest {
    pub user_id: String,
    pub activity_type: ActivityType,
    /// Duration in minutes; negative values are rejected
    pub duration_minutes: Option<i64>,
    /// Calories burned; negative values are rejected
    pub calories_burned: Option<i64>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub additional_metrics: BTreeMap<String, serde_json::Value>,
}

/// Check the request's field constraints.
fn validate(request: &ActivityRequest) -> Result<()> {
    if request.user_id.trim().is_empty() {
        return Err(AppError::BadRequest(
            "user_id must not be empty".to_string(),
        ));
    }
    if request.duration_minutes.is_some_and(|d| d < 0) {
        return Err(AppError::BadRequest(
            "duration_minutes must not be negative".to_string(),
        ));
    }
    if request.calories_burned.is_some_and(|c| c < 0) {
        return Err(AppError::BadRequest(
            "calories_burned must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// Ingestion-side service owning activity submission and listing.
#[derive(Clone)]
pub struct ActivityService {
    db: FirestoreDb,
    users: UserValidationClient,
    bus: EventBus,
    publish_policy: PublishFailurePolicy,
}

impl ActivityService {
    pub fn new(
        db: FirestoreDb,
        users: UserValidationClient,
        bus: EventBus,
        publish_policy: PublishFailurePolicy,
    ) -> Self {
        Self {
            db,
            users,
            bus,
            publish_policy,
        }
    }

    /// Submit a new activity.
    ///
    /// On success exactly one activity is persisted and at most one event
    /// is published. An invalid user rejects the submission before anything
    /// is written.
    pub async fn submit(&self, request: ActivityRequest) -> Result<Activity> {
        validate(&request)?;

        let user_id = request.user_id.trim().to_string();
        if !self.users.validate_user(&user_id).await? {
            tracing::warn!(user_id = %user_id, "Rejected activity for invalid user");
            return Err(AppError::InvalidUser(user_id));
        }

        let now = Utc::now();
        let activity = Activity {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            activity_type: request.activity_type,
            calories_burned: request.calories_burned.unwrap_or(0) as u32,
            duration_minutes: request.duration_minutes.unwrap_or(0) as u32,
            start_time: request.start_time,
            additional_metrics: request.additional_metrics,
            created_at: now,
            updated_at: now,
        };

        self.db.save_activity(&activity).await?;
        tracing::info!(
            activity_id = %activity.id,
            user_id = %activity.user_id,
            activity_type = %activity.activity_type,
            "Activity persisted"
        );

        let event = ActivityEvent::from(&activity);
        if let Err(e) = self.bus.publish(&activity.user_id, &event) {
            match self.publish_policy {
                PublishFailurePolicy::LogAndContinue => {
                    // The activity stays persisted; no recommendation will
                    // ever be generated for it.
                    tracing::error!(
                        activity_id = %activity.id,
                        user_id = %activity.user_id,
                        error = %e,
                        "Failed to publish activity event, continuing"
                    );
                }
                PublishFailurePolicy::FailRequest => {
                    return Err(AppError::Publish(e.to_string()));
                }
            }
        }

        Ok(activity)
    }

    /// List a user's activities, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Activity>> {
        if user_id.trim().is_empty() {
            return Err(AppError::BadRequest(
                "user_id must not be empty".to_string(),
            ));
        }
        self.db.get_activities_for_user(user_id.trim()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ActivityRequest {
        ActivityRequest {
            user_id: "user-1".to_string(),
            activity_type: ActivityType::Cycling,
            duration_minutes: Some(90),
            calories_burned: Some(800),
            start_time: Utc::now(),
            additional_metrics: BTreeMap::new(),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_user_id() {
        let mut req = request();
        req.user_id = "   ".to_string();
        assert!(matches!(validate(&req), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_validate_rejects_negative_duration() {
        let mut req = request();
        req.duration_minutes = Some(-5);
        assert!(matches!(validate(&req), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_validate_rejects_negative_calories() {
        let mut req = request();
        req.calories_burned = Some(-1);
        assert!(matches!(validate(&req), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_validate_allows_absent_optionals() {
        let mut req = request();
        req.duration_minutes = None;
        req.calories_burned = None;
        assert!(validate(&req).is_ok());
    }
}
