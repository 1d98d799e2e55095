// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation model and the intermediate parsed-analysis form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder when the AI returned no usable improvement entries.
pub const NO_IMPROVEMENTS_PLACEHOLDER: &str = "No specific improvements provided";
/// Placeholder when the AI returned no usable workout suggestions.
pub const NO_SUGGESTIONS_PLACEHOLDER: &str = "No specific Suggestion provided";
/// Placeholder when the AI returned no safety guidelines.
pub const NO_SAFETY_PLACEHOLDER: &str = "Follow general safety guidelines.";

/// Stored coaching recommendation in Firestore.
///
/// Immutable after creation; one is written per consumed activity event.
/// The list fields are never empty (placeholder-filled when the AI gave
/// nothing usable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Server-assigned UUID (also used as document ID)
    pub id: String,
    /// Activity this recommendation was generated for
    pub activity_id: String,
    /// Owning user ID
    pub user_id: String,
    /// Activity category, stored as its wire string
    pub activity_type: String,
    /// Labeled multi-section analysis text
    pub analysis: String,
    /// Improvement advice, one "<area>: <detail>" line per entry
    pub improvements: Vec<String>,
    /// Follow-up workout suggestions, one "<workout>: <description>" per entry
    pub suggestions: Vec<String>,
    /// Safety guidelines
    pub safety: Vec<String>,
    /// When this recommendation was created
    pub created_at: DateTime<Utc>,
}

/// One improvement entry from the AI payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImprovementNote {
    pub area: String,
    pub recommendation: String,
}

/// One suggested follow-up workout from the AI payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutSuggestion {
    pub workout: String,
    pub description: String,
}

/// Structured view of a normalized AI response. Transient: exists only
/// between normalization and assembly, never persisted.
///
/// Analysis sections are optional (the AI may omit any of them); the list
/// fields may be empty here, since the placeholder policy is applied when
/// the lists are rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedAnalysis {
    pub overall: Option<String>,
    pub pace: Option<String>,
    pub heart_rate: Option<String>,
    pub calories_burned: Option<String>,
    pub improvements: Vec<ImprovementNote>,
    pub suggestions: Vec<WorkoutSuggestion>,
    pub safety: Vec<String>,
}

impl ParsedAnalysis {
    /// Render the labeled analysis text.
    ///
    /// Sections appear in a fixed order (Overall, Pace, Heart Rate,
    /// Calories Burned), each followed by a blank line; absent sections are
    /// skipped. The result is trimmed.
    pub fn analysis_text(&self) -> String {
        let mut buffer = String::new();
        let sections = [
            ("Overall:", &self.overall),
            ("Pace:", &self.pace),
            ("Heart Rate:", &self.heart_rate),
            ("Calories Burned:", &self.calories_burned),
        ];
        for (label, value) in sections {
            if let Some(text) = value {
                buffer.push_str(label);
                buffer.push_str(text);
                buffer.push_str("\n\n");
            }
        }
        buffer.trim().to_string()
    }

    /// Render improvement lines, placeholder-filled when empty.
    pub fn improvement_lines(&self) -> Vec<String> {
        if self.improvements.is_empty() {
            return vec![NO_IMPROVEMENTS_PLACEHOLDER.to_string()];
        }
        self.improvements
            .iter()
            .map(|i| format!("{}: {}", i.area, i.recommendation))
            .collect()
    }

    /// Render suggestion lines, placeholder-filled when empty.
    pub fn suggestion_lines(&self) -> Vec<String> {
        if self.suggestions.is_empty() {
            return vec![NO_SUGGESTIONS_PLACEHOLDER.to_string()];
        }
        self.suggestions
            .iter()
            .map(|s| format!("{}: {}", s.workout, s.description))
            .collect()
    }

    /// Safety guidelines, placeholder-filled when empty.
    pub fn safety_lines(&self) -> Vec<String> {
        if self.safety.is_empty() {
            return vec![NO_SAFETY_PLACEHOLDER.to_string()];
        }
        self.safety.clone()
    }
}
