/*!
 * Provider implementations for different translation backends.
 *
 * This module contains client implementations for the supported backends:
 * - Google: the public Google Translate endpoint
 * - Ollama: Local LLM server
 * - Anthropic: Anthropic API integration
 * - Mock: in-process translator and speech backends for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all HTTP translation backends
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

/// Read the body of a failed response and turn it into a provider error
pub(crate) async fn error_from_response(provider: &str, response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    log::error!("{} API error ({}): {}", provider, status, error_text);
    ProviderError::from_status(status.as_u16(), error_text)
}

pub mod anthropic;
pub mod google;
pub mod mock;
pub mod ollama;
