// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Normalizes raw Gemini output into a [`ParsedAnalysis`].
//!
//! The provider is observed answering in more than one envelope shape, and
//! the generated text itself is only loosely schema-conformant. The policy
//! here is permissive per field and strict at the top level: a missing
//! sub-key becomes an empty string or `None`, but a response whose text
//! payload cannot be located, or whose payload is not the expected JSON at
//! all, fails normalization outright (the worker then falls back to the
//! default recommendation).

use crate::error::AppError;
use crate::models::{ImprovementNote, ParsedAnalysis, WorkoutSuggestion};
use serde::Deserialize;
use serde_json::Value;

// ─── Provider envelope shapes ────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CandidateEntry {
    content: ContentEntry,
}

#[derive(Debug, Deserialize)]
struct ContentEntry {
    parts: Vec<PartEntry>,
}

#[derive(Debug, Deserialize)]
struct PartEntry {
    text: String,
}

/// `candidates[0].content.parts[0].text`, the chat-completion shape.
fn decode_candidates_shape(root: &Value) -> Option<String> {
    let first = root.get("candidates")?.get(0)?;
    let entry: CandidateEntry = serde_json::from_value(first.clone()).ok()?;
    entry.content.parts.into_iter().next().map(|p| p.text)
}

/// `contents[0].parts[0].text`, the alternate shape.
fn decode_contents_shape(root: &Value) -> Option<String> {
    let first = root.get("contents")?.get(0)?;
    let entry: ContentEntry = serde_json::from_value(first.clone()).ok()?;
    entry.parts.into_iter().next().map(|p| p.text)
}

/// Locate the generated text, trying the known shapes in priority order.
fn payload_text(root: &Value) -> Option<String> {
    decode_candidates_shape(root).or_else(|| decode_contents_shape(root))
}

// ─── Inner coaching payload ──────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CoachingPayload {
    analysis: AnalysisSections,
    improvements: Vec<ImprovementEntry>,
    suggestions: Vec<SuggestionEntry>,
    safety: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnalysisSections {
    overall: Option<String>,
    pace: Option<String>,
    #[serde(rename = "heartRate")]
    heart_rate: Option<String>,
    #[serde(rename = "caloriesBurned")]
    calories_burned: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImprovementEntry {
    area: String,
    recommendation: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SuggestionEntry {
    workout: String,
    description: String,
}

/// Strip a surrounding Markdown code fence (with optional language tag)
/// and whitespace. Unfenced text is returned trimmed.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // The opening fence line carries an optional language tag; the payload
    // starts after the first newline.
    let Some(newline) = rest.find('\n') else {
        return trimmed;
    };
    let body = rest[newline + 1..].trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Normalize a raw Gemini response into a [`ParsedAnalysis`].
pub fn normalize(raw: &str) -> Result<ParsedAnalysis, AppError> {
    let root: Value = serde_json::from_str(raw)
        .map_err(|e| AppError::MalformedAiResponse(format!("response is not JSON: {}", e)))?;

    let text = payload_text(&root).ok_or_else(|| {
        AppError::MalformedAiResponse(
            "no generated text under candidates or contents".to_string(),
        )
    })?;

    let payload: CoachingPayload = serde_json::from_str(strip_code_fence(&text))
        .map_err(|e| AppError::MalformedAiResponse(format!("unexpected payload: {}", e)))?;

    Ok(ParsedAnalysis {
        overall: payload.analysis.overall,
        pace: payload.analysis.pace,
        heart_rate: payload.analysis.heart_rate,
        calories_burned: payload.analysis.calories_burned,
        improvements: payload
            .improvements
            .into_iter()
            .map(|i| ImprovementNote {
                area: i.area,
                recommendation: i.recommendation,
            })
            .collect(),
        suggestions: payload
            .suggestions
            .into_iter()
            .map(|s| WorkoutSuggestion {
                workout: s.workout,
                description: s.description,
            })
            .collect(),
        safety: payload.safety,
    })
}
