/*!
 * Core translation service implementation.
 *
 * This module defines the `Translator` capability consumed by the document
 * orchestrator and `TranslationService`, the config-driven implementation
 * that dispatches each request to the selected backend.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error};
use parking_lot::Mutex;
use std::time::{Duration, Instant};

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::ProviderError;
use crate::language_utils::{SourceLanguage, get_language_name};
use crate::providers::Provider;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::google::{GoogleRequest, GoogleTranslate};
use crate::providers::ollama::{GenerationRequest, Ollama};
use super::cache::TranslationCache;

/// A single chunk translation request
///
/// Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    source: SourceLanguage,
    target: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source: SourceLanguage, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source,
            target: target.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &SourceLanguage {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Capability that turns (text, source, target) into translated text
///
/// Timeouts, if any, are the implementation's responsibility.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError>;
}

/// Usage statistics accumulated over the lifetime of a service
#[derive(Debug, Clone, Default)]
pub struct UsageStats {
    /// Backend calls made (cache hits excluded)
    pub requests: u64,
    /// Characters sent to the backend
    pub characters: u64,
    /// Number of prompt tokens, when the backend reports them
    pub prompt_tokens: u64,
    /// Number of completion tokens, when the backend reports them
    pub completion_tokens: u64,
    /// Total time spent waiting on the backend
    pub api_duration: Duration,
}

impl UsageStats {
    fn record(&mut self, characters: usize, tokens: (Option<u64>, Option<u64>), duration: Duration) {
        self.requests += 1;
        self.characters += characters as u64;
        self.prompt_tokens += tokens.0.unwrap_or(0);
        self.completion_tokens += tokens.1.unwrap_or(0);
        self.api_duration += duration;
    }

    /// Generate a one-line summary of usage
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} requests, {} characters, {:.2}s waiting on the backend",
            self.requests,
            self.characters,
            self.api_duration.as_secs_f64()
        );
        if self.prompt_tokens + self.completion_tokens > 0 {
            summary.push_str(&format!(
                ", {} prompt + {} completion tokens",
                self.prompt_tokens, self.completion_tokens
            ));
        }
        summary
    }
}

/// Translation backend variants
#[derive(Debug)]
enum TranslationProviderImpl {
    /// Public Google Translate endpoint
    Google {
        /// Client instance
        client: GoogleTranslate,
    },

    /// Ollama LLM service
    Ollama {
        /// Client instance
        client: Ollama,
    },

    /// Anthropic API service
    Anthropic {
        /// Client instance
        client: Anthropic,
    },
}

/// Config-driven translator backed by one of the supported providers
#[derive(Debug)]
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,

    /// Translation cache for storing and retrieving translations
    pub cache: TranslationCache,

    usage: Mutex<UsageStats>,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let timeout_secs = config.get_timeout_secs();
        let provider = match config.provider {
            ConfigTranslationProvider::Google => TranslationProviderImpl::Google {
                client: GoogleTranslate::new(config.get_endpoint(), timeout_secs),
            },
            ConfigTranslationProvider::Ollama => TranslationProviderImpl::Ollama {
                client: Ollama::new(config.get_endpoint(), timeout_secs),
            },
            ConfigTranslationProvider::Anthropic => TranslationProviderImpl::Anthropic {
                client: Anthropic::new(
                    config.get_api_key(),
                    config.get_endpoint(),
                    config.get_model(),
                    timeout_secs,
                ),
            },
        };

        Ok(Self {
            provider,
            cache: TranslationCache::new(config.common.cache_enabled),
            config,
            usage: Mutex::new(UsageStats::default()),
        })
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        debug!(
            "Testing connection to {} with model {}",
            self.config.provider.display_name(),
            self.config.get_model()
        );
        match &self.provider {
            TranslationProviderImpl::Google { client } => client.test_connection().await,
            TranslationProviderImpl::Ollama { client } => client.test_connection().await,
            TranslationProviderImpl::Anthropic { client } => client.test_connection().await,
        }
    }

    /// Snapshot of the usage accumulated so far
    pub fn usage(&self) -> UsageStats {
        self.usage.lock().clone()
    }

    /// Render the configured system prompt for a language pair
    fn system_prompt(&self, source: &SourceLanguage, target: &str) -> String {
        let source_name = match source {
            SourceLanguage::Auto => "the language of the text".to_string(),
            SourceLanguage::Code(code) => get_language_name(code).unwrap_or_else(|_| code.clone()),
        };
        let target_name = get_language_name(target).unwrap_or_else(|_| target.to_string());

        self.config
            .common
            .system_prompt
            .replace("{source_language}", &source_name)
            .replace("{target_language}", &target_name)
    }

    /// Send a request to the backend, returning the text and token usage
    async fn dispatch(
        &self,
        request: &TranslationRequest,
    ) -> Result<(String, (Option<u64>, Option<u64>)), ProviderError> {
        match &self.provider {
            TranslationProviderImpl::Google { client } => {
                let response = client
                    .complete(GoogleRequest::new(
                        request.text(),
                        request.source().as_code(),
                        request.target(),
                    ))
                    .await?;
                Ok((GoogleTranslate::extract_text(&response), (None, None)))
            }
            TranslationProviderImpl::Ollama { client } => {
                let generation = GenerationRequest::new(self.config.get_model(), request.text())
                    .system(self.system_prompt(request.source(), request.target()))
                    .temperature(self.config.common.temperature);
                let response = client.complete(generation).await?;
                let tokens = (response.prompt_eval_count, response.eval_count);
                Ok((Ollama::extract_text(&response), tokens))
            }
            TranslationProviderImpl::Anthropic { client } => {
                let model = self.config.get_model();
                let message = AnthropicRequest::new(model.clone(), max_tokens_for_model(&model))
                    .system(self.system_prompt(request.source(), request.target()))
                    .add_message("user", request.text())
                    .temperature(self.config.common.temperature);
                let response = client.complete(message).await?;
                let tokens = (
                    Some(response.usage.input_tokens as u64),
                    Some(response.usage.output_tokens as u64),
                );
                Ok((Anthropic::extract_text(&response), tokens))
            }
        }
    }
}

#[async_trait]
impl Translator for TranslationService {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let source = request.source().as_code();

        if let Some(cached) = self.cache.get(request.text(), source, request.target()) {
            return Ok(cached);
        }

        let start_time = Instant::now();
        match self.dispatch(request).await {
            Ok((translated, tokens)) => {
                self.usage
                    .lock()
                    .record(request.text().chars().count(), tokens, start_time.elapsed());
                self.cache.store(request.text(), source, request.target(), &translated);
                Ok(translated)
            }
            Err(e) => {
                error!(
                    "{} translation error ({} -> {}): {}",
                    self.config.provider.display_name(),
                    source,
                    request.target(),
                    e
                );
                Err(e)
            }
        }
    }
}

/// Get the maximum number of output tokens to request for a model
fn max_tokens_for_model(model: &str) -> u32 {
    match model {
        "claude-3-opus-20240229" | "claude-3-sonnet-20240229" | "claude-3-haiku-20240307" => 4096,
        m if m.starts_with("claude-3-5") || m.starts_with("claude-3-7") => 8192,
        _ => 4096,
    }
}
