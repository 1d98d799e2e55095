// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini API client.
//!
//! Wraps one prompt string into the provider's request envelope and returns
//! the raw response body. The caller owns all interpretation of that body;
//! this client only distinguishes "got a 2xx body" from "didn't".

use crate::error::AppError;
use serde::Serialize;
use std::time::Duration;

/// Header carrying the API key, per the Gemini REST contract.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Request envelope: {"contents": [{"parts": [{"text": ...}]}]}
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

impl GenerateRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a new client with a bounded per-request timeout.
    ///
    /// The timeout keeps one slow AI call from stalling a worker partition
    /// forever; expiry surfaces as a transport error like any other network
    /// failure.
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_url,
            api_key,
        }
    }

    /// Send one prompt and return the raw response body as text.
    ///
    /// No retries; any transport failure or non-2xx status is an error the
    /// caller handles.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, AppError> {
        let request = GenerateRequest::from_prompt(prompt);

        let response = self
            .http
            .post(&self.api_url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::AiTransport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::AiTransport(format!("HTTP {}: {}", status, body)));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::AiTransport(format!("Failed to read body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_envelope_shape() {
        let request = GenerateRequest::from_prompt("analyze this");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{"parts": [{"text": "analyze this"}]}]
            })
        );
    }
}
