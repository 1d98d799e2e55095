// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness-Coach: AI coaching recommendations for tracked activities
//!
//! This crate provides the backend for ingesting fitness activities and
//! generating per-activity coaching recommendations through an
//! event-driven AI pipeline.

pub mod bus;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::ActivityService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub activity_service: ActivityService,
}
