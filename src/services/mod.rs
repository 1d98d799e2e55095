// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod analysis;
pub mod gemini;
pub mod recommendation;
pub mod users;

pub use activity::{ActivityRequest, ActivityService};
pub use gemini::GeminiClient;
pub use recommendation::RecommendationWorker;
pub use users::UserValidationClient;
