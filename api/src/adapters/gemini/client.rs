//! Gemini API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::ports::AiClient;
use crate::error::AiError;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Implementation of the AI client against Gemini `generateContent`
///
/// Without an API key every call fails with `AiError::NotConfigured`, which
/// callers treat like any other AI failure. The key travels in the
/// `x-goog-api-key` header so it never shows up in URLs or error text.
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(
        base_url: String,
        model: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AiError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<GenerateContentResponse, AiError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| AiError::Deserialization(e.to_string()))
        } else if status.as_u16() == 429 {
            Err(AiError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(AiError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Request types for the Gemini API
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Response types for the Gemini API
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, with all of its text parts joined
    fn into_text(self) -> Result<String, AiError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            Err(AiError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}

#[async_trait]
impl AiClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::NotConfigured)?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.generate_url())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Request(e.without_url()))?;

        let text = self.handle_response(response).await?.into_text()?;
        tracing::debug!(model = %self.model, chars = text.len(), "Gemini answered");
        Ok(text)
    }
}
