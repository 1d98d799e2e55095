// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User validation client.
//!
//! Identity lives in a separate user service; all this process needs is a
//! yes/no answer for a submitted user id.

use crate::error::AppError;

/// Client for the user service's validation endpoint.
#[derive(Clone)]
pub struct UserValidationClient {
    http: reqwest::Client,
    base_url: String,
    /// Fixed answer for offline tests; `None` means go over the wire.
    static_answer: Option<bool>,
}

impl UserValidationClient {
    /// Create a client against the configured user service.
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            static_answer: None,
        }
    }

    /// Create a mock client that answers every validation with `answer`,
    /// without any network I/O.
    #[cfg(debug_assertions)]
    pub fn new_mock(answer: bool) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "http://mock.invalid".to_string(),
            static_answer: Some(answer),
        }
    }

    /// Check whether `user_id` names a registered user.
    ///
    /// GET {base}/api/users/{user_id}/validate -> JSON boolean.
    /// Transport failures and non-2xx responses are upstream errors, not a
    /// "no"; the caller must not treat them as a failed validation.
    pub async fn validate_user(&self, user_id: &str) -> Result<bool, AppError> {
        if let Some(answer) = self.static_answer {
            return Ok(answer);
        }

        let url = format!("{}/api/users/{}/validate", self.base_url, user_id);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::UserService(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UserService(format!("HTTP {}: {}", status, body)));
        }

        response
            .json::<bool>()
            .await
            .map_err(|e| AppError::UserService(format!("JSON parse error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_answers_without_io() {
        let valid = UserValidationClient::new_mock(true);
        assert!(valid.validate_user("anyone").await.unwrap());

        let invalid = UserValidationClient::new_mock(false);
        assert!(!invalid.validate_user("anyone").await.unwrap());
    }
}
