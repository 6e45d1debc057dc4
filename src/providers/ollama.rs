use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{Provider, error_from_response};

/// Ollama client for interacting with Ollama API
#[derive(Debug, Clone)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation options for the Ollama API
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation (default: 0.8)
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    pub model: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    pub done: bool,
    /// Why generation stopped ("stop", "length", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_reason: Option<String>,
    /// Number of prompt tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

/// Version response from the Ollama API
#[derive(Debug, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

impl GenerationRequest {
    /// Create a new non-streaming generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: Some(false),
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).temperature = Some(temperature);
        self
    }
}

impl Ollama {
    /// Create a new Ollama client from a base URL such as `http://localhost:11434`
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        let base_url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", endpoint.trim_end_matches('/'))
        };

        Self {
            base_url,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                // Ollama speaks HTTP/1.1
                .http1_only()
                .pool_idle_timeout(Duration::from_secs(90))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Reject responses that do not hold a complete translation
    pub fn ensure_complete(response: GenerationResponse) -> Result<GenerationResponse, ProviderError> {
        if response.done_reason.as_deref() == Some("length") {
            return Err(ProviderError::ParseError(
                "Ollama output was cut off at the token limit".to_string(),
            ));
        }
        if Self::extract_text(&response).is_empty() {
            return Err(ProviderError::ParseError(format!("Ollama model {} returned no text", response.model)));
        }
        Ok(response)
    }

    /// Get the server version
    pub async fn version(&self) -> Result<VersionResponse, ProviderError> {
        let response = self.client.get(format!("{}/api/version", self.base_url)).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response("Ollama", response).await);
        }
        Ok(response.json::<VersionResponse>().await?)
    }
}

#[async_trait]
impl Provider for Ollama {
    type Request = GenerationRequest;
    type Response = GenerationResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response("Ollama", response).await);
        }

        let body = response.text().await?;
        let generation = serde_json::from_str::<GenerationResponse>(&body).map_err(|e| {
            let preview: String = body.chars().take(500).collect();
            ProviderError::ParseError(format!("{} (response starts with: {})", e, preview))
        })?;
        Self::ensure_complete(generation)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.version().await.map(|_| ())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.response.trim().to_string()
    }
}
