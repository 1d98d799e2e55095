// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitness-Coach API Server
//!
//! Ingests fitness activities and generates AI coaching recommendations
//! for each one via an event-driven worker pipeline.

use fitness_coach::{
    bus::EventBus,
    config::Config,
    db::FirestoreDb,
    services::{ActivityService, GeminiClient, RecommendationWorker, UserValidationClient},
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Fitness-Coach API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Create the activity event bus
    let (bus, partition_streams) =
        EventBus::channel(config.bus_partitions, config.bus_queue_depth);
    tracing::info!(
        partitions = config.bus_partitions,
        depth = config.bus_queue_depth,
        "Activity event bus created"
    );

    // Start the recommendation worker (one consumer task per partition)
    let gemini = GeminiClient::new(
        config.gemini_api_url.clone(),
        config.gemini_api_key.clone(),
        Duration::from_secs(config.ai_timeout_secs),
    );
    let worker = RecommendationWorker::new(gemini, db.clone());
    let worker_handles = worker.spawn(partition_streams);
    tracing::info!(
        tasks = worker_handles.len(),
        "Recommendation worker started"
    );

    // Initialize user validation client
    let users = UserValidationClient::new(config.user_service_url.clone());

    // Ingestion service
    let activity_service = ActivityService::new(
        db.clone(),
        users,
        bus,
        config.publish_failure_policy,
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        activity_service,
    });

    // Build router
    let app = fitness_coach::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitness_coach=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
