// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity model for storage and the event stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Supported activity categories.
///
/// Wire form is SCREAMING_SNAKE_CASE to match the mobile clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Running,
    Walking,
    Cycling,
    WeightTraining,
    Yoga,
    Hiit,
    Cardio,
    Stretching,
    Other,
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActivityType::Running => "RUNNING",
            ActivityType::Walking => "WALKING",
            ActivityType::Cycling => "CYCLING",
            ActivityType::WeightTraining => "WEIGHT_TRAINING",
            ActivityType::Yoga => "YOGA",
            ActivityType::Hiit => "HIIT",
            ActivityType::Cardio => "CARDIO",
            ActivityType::Stretching => "STRETCHING",
            ActivityType::Other => "OTHER",
        };
        f.write_str(s)
    }
}

/// Stored activity record in Firestore.
///
/// `id` and `user_id` are immutable once assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Server-assigned UUID (also used as document ID)
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    /// Activity category
    pub activity_type: ActivityType,
    /// Calories burned during the activity
    pub calories_burned: u32,
    /// Duration in minutes
    pub duration_minutes: u32,
    /// When the activity started
    pub start_time: DateTime<Utc>,
    /// Free-form per-activity metrics (distance, heart rate, ...).
    /// BTreeMap keeps iteration order stable for prompt rendering.
    pub additional_metrics: BTreeMap<String, serde_json::Value>,
    /// When this record was created
    pub created_at: DateTime<Utc>,
    /// When this record was last updated
    pub updated_at: DateTime<Utc>,
}

/// Wire snapshot of an activity placed on the event bus.
///
/// Carries everything the recommendation worker needs; the worker never
/// reads the activity back from storage, so a later mutation of the stored
/// record cannot change what gets analyzed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub activity_id: String,
    pub user_id: String,
    pub activity_type: ActivityType,
    pub calories_burned: u32,
    pub duration_minutes: u32,
    pub start_time: DateTime<Utc>,
    pub additional_metrics: BTreeMap<String, serde_json::Value>,
}

impl From<&Activity> for ActivityEvent {
    fn from(activity: &Activity) -> Self {
        Self {
            activity_id: activity.id.clone(),
            user_id: activity.user_id.clone(),
            activity_type: activity.activity_type,
            calories_burned: activity.calories_burned,
            duration_minutes: activity.duration_minutes,
            start_time: activity.start_time,
            additional_metrics: activity.additional_metrics.clone(),
        }
    }
}
