//! BackendClient - REST implementation of the remote history gateway.
//!
//! Talks to the Colloquy backend over three endpoints:
//! - `GET /me` resolves the identity behind a bearer token
//! - `GET /history` returns the canonical exchange list, oldest first
//! - `POST /ask` submits a message and returns the assistant reply
//!
//! Base URL priority: explicit constructor argument > `COLLOQUY_BACKEND_URL`
//! environment variable > local development default.

use async_trait::async_trait;
use colloquy_core::error::{ColloquyError, Result};
use colloquy_core::gateway::{ChatGateway, HistoryEntry};
use colloquy_core::identity::Identity;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Timeout for the small lookup endpoints (`/me`, `/history`).
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for `/ask`, which waits on model inference.
const ASK_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    message: &'a str,
    system_prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    detail: String,
}

/// REST adapter for the remote history gateway.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Reads the backend URL from `COLLOQUY_BACKEND_URL`, falling back to
    /// the local development default.
    pub fn from_env() -> Self {
        let base_url =
            env::var("COLLOQUY_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self::new(base_url)
    }

    /// Converts a non-success response into a backend error, extracting the
    /// `detail` field the backend puts in failure bodies.
    async fn failure(response: reqwest::Response) -> ColloquyError {
        let status = response.status().as_u16();
        let detail = match response.json::<ApiError>().await {
            Ok(body) => body.detail,
            Err(_) => "unknown error".to_string(),
        };
        ColloquyError::backend(status, detail)
    }
}

#[async_trait]
impl ChatGateway for BackendClient {
    async fn me(&self, token: &str) -> Result<Identity> {
        let response = self
            .client
            .get(format!("{}/me", self.base_url))
            .header("Authorization", format!("Bearer {}", token))
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        Ok(response.json::<Identity>().await?)
    }

    async fn history(&self, token: &str) -> Result<Vec<HistoryEntry>> {
        let response = self
            .client
            .get(format!("{}/history", self.base_url))
            .header("Authorization", format!("Bearer {}", token))
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        Ok(response.json::<Vec<HistoryEntry>>().await?)
    }

    async fn ask(
        &self,
        message: &str,
        system_prompt: &str,
        token: Option<&str>,
    ) -> Result<String> {
        let mut request = self
            .client
            .post(format!("{}/ask", self.base_url))
            .json(&AskRequest {
                message,
                system_prompt,
            })
            .timeout(ASK_TIMEOUT);

        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        Ok(response.json::<AskResponse>().await?.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_request_matches_wire_format() {
        let body = AskRequest {
            message: "hi",
            system_prompt: "You are a helpful assistant.",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "hi");
        assert_eq!(json["system_prompt"], "You are a helpful assistant.");
    }

    #[test]
    fn ask_response_parses_response_field() {
        let parsed: AskResponse = serde_json::from_str(r#"{"response":"Hi!"}"#).unwrap();
        assert_eq!(parsed.response, "Hi!");
    }

    #[test]
    fn api_error_parses_detail_field() {
        let parsed: ApiError = serde_json::from_str(r#"{"detail":"quota exceeded"}"#).unwrap();
        assert_eq!(parsed.detail, "quota exceeded");
    }

    #[test]
    fn history_entry_parses_backend_shape() {
        let parsed: Vec<HistoryEntry> =
            serde_json::from_str(r#"[{"input_text":"q","output_text":"a"}]"#).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].input_text, "q");
        assert_eq!(parsed[0].output_text, "a");
    }
}
