// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fitness_coach::bus::{EventBus, PartitionStream};
use fitness_coach::config::Config;
use fitness_coach::db::FirestoreDb;
use fitness_coach::routes::create_router;
use fitness_coach::services::{ActivityService, UserValidationClient};
use fitness_coach::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies and every user valid.
///
/// Returns the router, the shared state, and the bus partition streams so
/// tests can observe (or starve) the published events.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Vec<PartitionStream>) {
    create_test_app_with(UserValidationClient::new_mock(true), test_db_offline())
}

/// Create a test app with explicit user-validation and database doubles.
#[allow(dead_code)]
pub fn create_test_app_with(
    users: UserValidationClient,
    db: FirestoreDb,
) -> (axum::Router, Arc<AppState>, Vec<PartitionStream>) {
    let config = Config::test_default();
    let (bus, streams) = EventBus::channel(config.bus_partitions, config.bus_queue_depth);

    let activity_service = ActivityService::new(
        db.clone(),
        users,
        bus,
        config.publish_failure_policy,
    );

    let state = Arc::new(AppState {
        config,
        db,
        activity_service,
    });

    (create_router(state.clone()), state, streams)
}

/// A well-formed activity submission body.
#[allow(dead_code)]
pub fn activity_body(user_id: &str) -> serde_json::Value {
    serde_json::json!({
        "user_id": user_id,
        "activity_type": "RUNNING",
        "duration_minutes": 45,
        "calories_burned": 500,
        "start_time": "2026-08-01T07:30:00Z",
        "additional_metrics": {"distance_km": 8.4}
    })
}
