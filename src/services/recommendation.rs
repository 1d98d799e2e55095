// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation worker.
//!
//! Consumes activity events from the bus, asks Gemini for a coaching
//! analysis, and persists the assembled recommendation. Every consumed
//! event ends in exactly one persisted recommendation: AI or normalization
//! failures degrade to a fixed fallback instead of failing the record.

use crate::bus::{EventRecord, PartitionStream};
use crate::db::FirestoreDb;
use crate::error::Result;
use crate::models::{ActivityEvent, ParsedAnalysis, Recommendation};
use crate::services::analysis;
use crate::services::gemini::GeminiClient;
use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Analysis text of the fallback recommendation.
const FALLBACK_ANALYSIS: &str = "Server is busy, try after some time.";
const FALLBACK_IMPROVEMENT: &str = "Continue with your current routine.";
const FALLBACK_SUGGESTION: &str = "Try consulting with a fitness coach.";
const FALLBACK_SAFETY: [&str; 2] = [
    "Try consulting with a fitness coach.",
    "Do not do any reckless activity.",
];

/// Build the instructional prompt for one activity.
///
/// The demanded JSON schema is a contract with the normalizer; the metrics
/// map renders in stable key order, so identical activities always produce
/// the identical prompt.
pub fn build_prompt(event: &ActivityEvent) -> String {
    let metrics = serde_json::to_string(&event.additional_metrics)
        .unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"Analyze this fitness activity and provide detailed recommendations in the following EXACT format:
{{
  "analysis": {{
    "overall": "Overall analysis here",
    "pace": "Pace analysis here",
    "heartRate": "Heart rate analysis here",
    "caloriesBurned": "Calories analysis here"
  }},
  "improvements": [
    {{
      "area": "Area name",
      "recommendation": "Detailed recommendation"
    }}
  ],
  "suggestions": [
    {{
      "workout": "Workout name",
      "description": "Detailed workout description"
    }}
  ],
  "safety": [
    "Safety point 1",
    "Safety point 2"
  ]
}}

Analyze this activity:
Activity Type: {activity_type}
Duration: {duration} minutes
Calories Burned: {calories}
Additional Metrics: {metrics}

Provide detailed analysis focusing on performance, improvements, next workout suggestions, and safety guidelines.
Ensure the response follows the EXACT JSON format shown above.
"#,
        activity_type = event.activity_type,
        duration = event.duration_minutes,
        calories = event.calories_burned,
        metrics = metrics,
    )
}

/// Combine an activity snapshot with a normalized analysis into the final
/// recommendation record. Pure; the only nondeterminism is id and timestamp.
pub fn assemble(event: &ActivityEvent, parsed: &ParsedAnalysis) -> Recommendation {
    Recommendation {
        id: uuid::Uuid::new_v4().to_string(),
        activity_id: event.activity_id.clone(),
        user_id: event.user_id.clone(),
        activity_type: event.activity_type.to_string(),
        analysis: parsed.analysis_text(),
        improvements: parsed.improvement_lines(),
        suggestions: parsed.suggestion_lines(),
        safety: parsed.safety_lines(),
        created_at: Utc::now(),
    }
}

/// The fixed recommendation used when the AI call or normalization fails.
pub fn fallback_recommendation(event: &ActivityEvent) -> Recommendation {
    Recommendation {
        id: uuid::Uuid::new_v4().to_string(),
        activity_id: event.activity_id.clone(),
        user_id: event.user_id.clone(),
        activity_type: event.activity_type.to_string(),
        analysis: FALLBACK_ANALYSIS.to_string(),
        improvements: vec![FALLBACK_IMPROVEMENT.to_string()],
        suggestions: vec![FALLBACK_SUGGESTION.to_string()],
        safety: FALLBACK_SAFETY.iter().map(|s| s.to_string()).collect(),
        created_at: Utc::now(),
    }
}

/// Event consumer generating and persisting recommendations.
pub struct RecommendationWorker {
    gemini: GeminiClient,
    db: FirestoreDb,
}

impl RecommendationWorker {
    pub fn new(gemini: GeminiClient, db: FirestoreDb) -> Self {
        Self { gemini, db }
    }

    /// Launch one consumer task per bus partition.
    ///
    /// A partition is drained sequentially, which keeps a user's
    /// recommendations in the order their activities were submitted;
    /// different partitions run concurrently.
    pub fn spawn(self, streams: Vec<PartitionStream>) -> Vec<JoinHandle<()>> {
        let worker = Arc::new(self);
        streams
            .into_iter()
            .map(|stream| {
                let worker = Arc::clone(&worker);
                tokio::spawn(async move { worker.run_partition(stream).await })
            })
            .collect()
    }

    async fn run_partition(&self, mut stream: PartitionStream) {
        let partition = stream.partition();
        tracing::info!(partition, "Recommendation worker partition started");

        while let Some(record) = stream.recv().await {
            self.process_record(partition, record).await;
        }

        tracing::info!(partition, "Recommendation worker partition stopped");
    }

    /// Handle one bus record end to end.
    pub async fn process_record(&self, partition: usize, record: EventRecord) {
        let event: ActivityEvent = match serde_json::from_slice(&record.payload) {
            Ok(event) => event,
            Err(e) => {
                // A record we cannot decode can never yield a recommendation;
                // redelivering it would loop forever.
                tracing::error!(
                    partition,
                    key = %record.key,
                    error = %e,
                    "Dropping undecodable activity event"
                );
                return;
            }
        };

        tracing::info!(
            partition,
            user_id = %event.user_id,
            activity_id = %event.activity_id,
            "Received activity for processing"
        );

        let recommendation = self.generate(&event).await;

        if let Err(e) = self.db.save_recommendation(&recommendation).await {
            tracing::error!(
                activity_id = %event.activity_id,
                error = %e,
                "Failed to persist recommendation"
            );
            return;
        }

        tracing::info!(
            activity_id = %event.activity_id,
            recommendation_id = %recommendation.id,
            "Recommendation persisted"
        );
    }

    /// Generate a recommendation for one activity event. Infallible: any
    /// AI or normalization error degrades to the fallback recommendation.
    ///
    /// The AI call is awaited inline, so one request is in flight per
    /// partition at most; that, not a limiter, is what bounds load on the
    /// endpoint.
    pub async fn generate(&self, event: &ActivityEvent) -> Recommendation {
        match self.try_generate(event).await {
            Ok(recommendation) => recommendation,
            Err(e) => {
                tracing::warn!(
                    activity_id = %event.activity_id,
                    user_id = %event.user_id,
                    error = %e,
                    "AI analysis failed, using fallback recommendation"
                );
                fallback_recommendation(event)
            }
        }
    }

    async fn try_generate(&self, event: &ActivityEvent) -> Result<Recommendation> {
        let prompt = build_prompt(event);
        let raw = self.gemini.generate_content(&prompt).await?;
        let parsed = analysis::normalize(&raw)?;
        Ok(assemble(event, &parsed))
    }
}
