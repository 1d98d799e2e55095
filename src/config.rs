// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything is resolved once at startup and injected into components;
//! nothing reads the environment after boot.

use std::env;
use std::str::FromStr;

/// What `submit` does when the activity event cannot be published.
///
/// The activity is already persisted by the time publishing happens, so the
/// choice is only about what the caller sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishFailurePolicy {
    /// Log the failure and report success to the caller. The activity is
    /// persisted but no recommendation will ever be generated for it.
    #[default]
    LogAndContinue,
    /// Surface the failure as a 502 to the caller (activity stays persisted).
    FailRequest,
}

impl FromStr for PublishFailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log-and-continue" | "log" => Ok(Self::LogAndContinue),
            "fail-request" | "fail" => Ok(Self::FailRequest),
            _ => Err(ConfigError::Invalid("PUBLISH_FAILURE_POLICY")),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Base URL of the user service (identity validation)
    pub user_service_url: String,
    /// Gemini generateContent endpoint URL
    pub gemini_api_url: String,
    /// Gemini API key (sent in the x-goog-api-key header)
    pub gemini_api_key: String,
    /// Request timeout for the AI call, in seconds
    pub ai_timeout_secs: u64,
    /// Number of event bus partitions (per-user ordering, cross-user concurrency)
    pub bus_partitions: usize,
    /// Queue depth per partition; a full partition rejects publishes
    pub bus_queue_depth: usize,
    /// What to do when publishing an activity event fails
    pub publish_failure_policy: PublishFailurePolicy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            user_service_url: env::var("USER_SERVICE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("USER_SERVICE_URL"))?,
            gemini_api_url: env::var("GEMINI_API_URL")
                .map_err(|_| ConfigError::Missing("GEMINI_API_URL"))?,
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GEMINI_API_KEY"))?,
            ai_timeout_secs: env::var("AI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            bus_partitions: env::var("BUS_PARTITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(4),
            bus_queue_depth: env::var("BUS_QUEUE_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(256),
            publish_failure_policy: match env::var("PUBLISH_FAILURE_POLICY") {
                Ok(raw) => raw.parse()?,
                Err(_) => PublishFailurePolicy::default(),
            },
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            gcp_project_id: "test-project".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            user_service_url: "http://localhost:8081".to_string(),
            gemini_api_url: "http://localhost:9090/v1beta/models/gemini:generateContent"
                .to_string(),
            gemini_api_key: "test_api_key".to_string(),
            ai_timeout_secs: 5,
            bus_partitions: 2,
            bus_queue_depth: 16,
            publish_failure_policy: PublishFailurePolicy::LogAndContinue,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_failure_policy_parsing() {
        assert_eq!(
            "log-and-continue".parse::<PublishFailurePolicy>().unwrap(),
            PublishFailurePolicy::LogAndContinue
        );
        assert_eq!(
            "FAIL-REQUEST".parse::<PublishFailurePolicy>().unwrap(),
            PublishFailurePolicy::FailRequest
        );
        assert_eq!(
            "fail".parse::<PublishFailurePolicy>().unwrap(),
            PublishFailurePolicy::FailRequest
        );
        assert!("retry-forever".parse::<PublishFailurePolicy>().is_err());
    }

    #[test]
    fn test_policy_default_is_log_and_continue() {
        assert_eq!(
            PublishFailurePolicy::default(),
            PublishFailurePolicy::LogAndContinue
        );
    }

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("USER_SERVICE_URL", "http://users.internal/");
        env::set_var("GEMINI_API_URL", "http://gemini.internal/generate");
        env::set_var("GEMINI_API_KEY", " test_key ");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.user_service_url, "http://users.internal");
        assert_eq!(config.gemini_api_key, "test_key");
        assert_eq!(config.port, 8080);
        assert_eq!(config.ai_timeout_secs, 30);
        assert_eq!(
            config.publish_failure_policy,
            PublishFailurePolicy::LogAndContinue
        );
    }
}
