use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{Provider, error_from_response};

/// Client for the public Google Translate endpoint
///
/// Uses the keyless `translate_a/single?client=gtx` API. Text goes in the
/// form body so that a full 4500 character chunk does not blow the URL limit.
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Base URL, e.g. `https://translate.googleapis.com`
    endpoint: String,
}

/// Translation request for the Google endpoint
#[derive(Debug, Clone)]
pub struct GoogleRequest {
    /// Text to translate
    pub text: String,
    /// Source language code, or `auto`
    pub source: String,
    /// Target language code
    pub target: String,
}

/// Parsed Google response
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleResponse {
    /// Translated segments in order
    pub segments: Vec<String>,
    /// Source language reported by the service
    pub detected_source: Option<String>,
}

impl GoogleRequest {
    pub fn new(text: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

impl GoogleTranslate {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    fn api_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://translate.googleapis.com/translate_a/single".to_string()
        } else {
            format!("{}/translate_a/single", self.endpoint.trim_end_matches('/'))
        }
    }

    /// Parse the nested array payload returned by the endpoint
    ///
    /// The payload looks like `[[["Bonjour.","Hello.",...],...],null,"en",...]`:
    /// the first element holds one entry per translated segment, and the
    /// third element is the detected source language.
    pub fn parse_response(body: &str) -> Result<GoogleResponse, ProviderError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Invalid JSON from Google Translate: {}", e)))?;

        let rows = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Missing translation segments".to_string()))?;

        let segments: Vec<String> = rows
            .iter()
            .filter_map(|row| row.get(0).and_then(Value::as_str))
            .map(str::to_string)
            .collect();

        if segments.is_empty() {
            return Err(ProviderError::ParseError("Google Translate returned no text".to_string()));
        }

        let detected_source = value.get(2).and_then(Value::as_str).map(str::to_string);

        Ok(GoogleResponse { segments, detected_source })
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    type Request = GoogleRequest;
    type Response = GoogleResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let response = self
            .client
            .post(self.api_url())
            .query(&[
                ("client", "gtx"),
                ("sl", request.source.as_str()),
                ("tl", request.target.as_str()),
                ("dt", "t"),
            ])
            .form(&[("q", request.text.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response("Google Translate", response).await);
        }

        let body = response.text().await?;
        Self::parse_response(&body)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.complete(GoogleRequest::new("Hello", "en", "fr")).await?;
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.segments.concat()
    }
}
