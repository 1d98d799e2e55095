// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation worker behavior against a mocked Gemini endpoint.

use fitness_coach::db::FirestoreDb;
use fitness_coach::models::{ActivityEvent, ActivityType};
use fitness_coach::services::{GeminiClient, RecommendationWorker};
use std::collections::BTreeMap;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INNER_PAYLOAD: &str = r#"{
    "analysis": {
        "overall": "Solid aerobic session",
        "pace": "Even effort throughout",
        "caloriesBurned": "Appropriate for the duration"
    },
    "improvements": [
        {"area": "Form", "recommendation": "Keep back straight"}
    ],
    "suggestions": [],
    "safety": ["Stay hydrated"]
}"#;

fn test_event() -> ActivityEvent {
    let mut metrics = BTreeMap::new();
    metrics.insert("distance_km".to_string(), serde_json::json!(8.4));

    ActivityEvent {
        activity_id: "act-1".to_string(),
        user_id: "user-1".to_string(),
        activity_type: ActivityType::Running,
        calories_burned: 500,
        duration_minutes: 45,
        start_time: chrono::Utc::now(),
        additional_metrics: metrics,
    }
}

fn worker_against(server: &MockServer) -> RecommendationWorker {
    let gemini = GeminiClient::new(
        format!("{}/generate", server.uri()),
        "test_api_key".to_string(),
        Duration::from_secs(1),
    );
    RecommendationWorker::new(gemini, FirestoreDb::new_mock())
}

fn candidates_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": text}]}}]
    })
}

#[tokio::test]
async fn test_generate_from_candidates_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidates_response(INNER_PAYLOAD)))
        .mount(&server)
        .await;

    let worker = worker_against(&server);
    let rec = worker.generate(&test_event()).await;

    // Sections render in fixed order, with the absent heartRate skipped.
    assert_eq!(
        rec.analysis,
        "Overall:Solid aerobic session\n\nPace:Even effort throughout\n\nCalories Burned:Appropriate for the duration"
    );
    assert_eq!(rec.improvements, vec!["Form: Keep back straight"]);
    assert_eq!(rec.suggestions, vec!["No specific Suggestion provided"]);
    assert_eq!(rec.safety, vec!["Stay hydrated"]);
    assert_eq!(rec.activity_id, "act-1");
    assert_eq!(rec.user_id, "user-1");
    assert_eq!(rec.activity_type, "RUNNING");
}

#[tokio::test]
async fn test_generate_from_contents_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "contents": [{"parts": [{"text": INNER_PAYLOAD}]}]
        })))
        .mount(&server)
        .await;

    let worker = worker_against(&server);
    let rec = worker.generate(&test_event()).await;

    assert!(rec.analysis.starts_with("Overall:Solid aerobic session"));
    assert_eq!(rec.improvements, vec!["Form: Keep back straight"]);
}

#[tokio::test]
async fn test_generate_with_fenced_payload() {
    let server = MockServer::start().await;
    let fenced = format!("```json\n{}\n```", INNER_PAYLOAD);
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidates_response(&fenced)))
        .mount(&server)
        .await;

    let worker = worker_against(&server);
    let rec = worker.generate(&test_event()).await;

    assert!(rec.analysis.starts_with("Overall:Solid aerobic session"));
    assert_eq!(rec.safety, vec!["Stay hydrated"]);
}

#[tokio::test]
async fn test_request_carries_api_key_and_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(header("x-goog-api-key", "test_api_key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"parts": [{}]}]
        })))
        .and(body_string_contains("Activity Type: RUNNING"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidates_response("{}")))
        .expect(1)
        .mount(&server)
        .await;

    let worker = worker_against(&server);
    let rec = worker.generate(&test_event()).await;

    // Empty-but-valid payload: every list falls back to its placeholder.
    assert_eq!(rec.analysis, "");
    assert_eq!(rec.improvements, vec!["No specific improvements provided"]);
    assert_eq!(rec.suggestions, vec!["No specific Suggestion provided"]);
    assert_eq!(rec.safety, vec!["Follow general safety guidelines."]);
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let worker = worker_against(&server);
    let rec = worker.generate(&test_event()).await;

    assert_eq!(rec.analysis, "Server is busy, try after some time.");
    assert_eq!(rec.improvements, vec!["Continue with your current routine."]);
    assert_eq!(rec.suggestions, vec!["Try consulting with a fitness coach."]);
    assert_eq!(
        rec.safety,
        vec![
            "Try consulting with a fitness coach.",
            "Do not do any reckless activity."
        ]
    );
}

#[tokio::test]
async fn test_non_json_body_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("I am not JSON at all"))
        .mount(&server)
        .await;

    let worker = worker_against(&server);
    let rec = worker.generate(&test_event()).await;

    assert_eq!(rec.analysis, "Server is busy, try after some time.");
}

#[tokio::test]
async fn test_unrecognized_envelope_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"choices": [{"text": "wrong provider"}]})),
        )
        .mount(&server)
        .await;

    let worker = worker_against(&server);
    let rec = worker.generate(&test_event()).await;

    assert_eq!(rec.analysis, "Server is busy, try after some time.");
}

#[tokio::test]
async fn test_slow_endpoint_times_out_to_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(candidates_response(INNER_PAYLOAD))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    // Client timeout is 1s; the 3s response must degrade to the fallback.
    let worker = worker_against(&server);
    let rec = worker.generate(&test_event()).await;

    assert_eq!(rec.analysis, "Server is busy, try after some time.");
}
