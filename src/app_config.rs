use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::language_utils::{self, SourceLanguage};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code, name, or "auto"
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language codes, in output order
    #[serde(default = "default_target_languages")]
    pub target_languages: Vec<String>,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Speech synthesis config
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Public Google Translate endpoint
    #[default]
    Google,
    // @provider: Ollama
    Ollama,
    // @provider: Anthropic
    Anthropic,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::Ollama => "Ollama",
            Self::Anthropic => "Anthropic",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Ollama => "ollama".to_string(),
            Self::Anthropic => "anthropic".to_string(),
        }
    }

    // @returns: Whether requests need an API key
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::Anthropic)
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "ollama" => Ok(Self::Ollama),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name (unused by Google)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::Google => Self {
                provider_type: "google".to_string(),
                model: String::new(),
                api_key: String::new(),
                endpoint: default_google_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                api_key: String::new(),
                endpoint: default_ollama_endpoint(),
                timeout_secs: default_llm_timeout_secs(),
            },
            TranslationProvider::Anthropic => Self {
                provider_type: "anthropic".to_string(),
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: default_anthropic_endpoint(),
                timeout_secs: default_llm_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Character budget of a single chunk
    #[serde(default = "default_max_chars_per_chunk")]
    pub max_chars_per_chunk: usize,

    /// Text placed between translated chunks
    #[serde(default = "default_chunk_separator")]
    pub chunk_separator: String,

    /// Chunk requests kept in flight per language (1 = sequential)
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Whether identical chunks are answered from memory
    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// System prompt template for LLM providers
    /// Placeholders: {source_language}, {target_language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Temperature parameter for LLM providers (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            max_chars_per_chunk: default_max_chars_per_chunk(),
            chunk_separator: default_chunk_separator(),
            concurrent_requests: default_concurrent_requests(),
            cache_enabled: true,
            system_prompt: default_system_prompt(),
            temperature: default_temperature(),
        }
    }
}

/// Speech synthesis settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    /// Whether to synthesize audio for each translation
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the speech endpoint
    #[serde(default = "default_speech_endpoint")]
    pub endpoint: String,

    /// Timeout seconds per audio request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Whether to also write an HTML page with an embedded download link
    #[serde(default)]
    pub write_download_link: bool,

    /// Maximum characters sent in a single audio request
    #[serde(default = "default_speech_max_chars")]
    pub max_chars_per_request: usize,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_speech_endpoint(),
            timeout_secs: default_timeout_secs(),
            write_download_link: false,
            max_chars_per_request: default_speech_max_chars(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    language_utils::AUTO_DETECT.to_string()
}

fn default_target_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_max_chars_per_chunk() -> usize {
    crate::translation::chunker::DEFAULT_MAX_CHARS
}

fn default_chunk_separator() -> String {
    crate::translation::orchestrator::DEFAULT_SEPARATOR.to_string()
}

fn default_concurrent_requests() -> usize {
    1
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_llm_timeout_secs() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.3
}

fn default_true() -> bool {
    true
}

fn default_speech_max_chars() -> usize {
    100
}

fn default_google_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_speech_endpoint() -> String {
    "https://translate.google.com".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_system_prompt() -> String {
    "You are a professional translator. Translate the user's text from {source_language} to {target_language}. \
     Preserve paragraph breaks and punctuation. Reply with the translation only, without notes or explanations."
        .to_string()
}

impl Config {
    /// Load the configuration from `path`, writing a default file first if none exists
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path).context(format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json).context(format!("Failed to write config to file: {:?}", path))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.source_language
            .parse::<SourceLanguage>()
            .context(format!("Invalid source language: {}", self.source_language))?;

        if self.target_languages.is_empty() {
            return Err(anyhow!("At least one target language is required"));
        }
        for target in &self.target_languages {
            language_utils::resolve_language(target).context(format!("Invalid target language: {}", target))?;
        }

        let common = &self.translation.common;
        if common.max_chars_per_chunk == 0 {
            return Err(anyhow!("max_chars_per_chunk must be greater than zero"));
        }
        if common.concurrent_requests == 0 {
            return Err(anyhow!("concurrent_requests must be greater than zero"));
        }
        if self.speech.max_chars_per_request == 0 {
            return Err(anyhow!("speech.max_chars_per_request must be greater than zero"));
        }

        if self.translation.provider.requires_api_key() && self.translation.get_api_key().is_empty() {
            return Err(anyhow!(
                "Translation API key is required for {} provider",
                self.translation.provider.display_name()
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_languages: default_target_languages(),
            translation: TranslationConfig::default(),
            speech: SpeechConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter().find(|p| p.provider_type == provider_str)
    }

    /// Mutable access to the active provider configuration, inserting defaults if missing
    pub fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        let index = match self.available_providers.iter().position(|p| p.provider_type == provider_str) {
            Some(index) => index,
            None => {
                self.available_providers.push(ProviderConfig::new(self.provider.clone()));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            TranslationProvider::Google => String::new(),
            TranslationProvider::Ollama => default_ollama_model(),
            TranslationProvider::Anthropic => default_anthropic_model(),
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        // Google and Ollama don't use API keys
        String::new()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            TranslationProvider::Google => default_google_endpoint(),
            TranslationProvider::Ollama => default_ollama_endpoint(),
            TranslationProvider::Anthropic => default_anthropic_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        match self.get_active_provider_config() {
            Some(provider_config) if provider_config.timeout_secs > 0 => provider_config.timeout_secs,
            _ => ProviderConfig::new(self.provider.clone()).timeout_secs,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(TranslationProvider::Google),
                ProviderConfig::new(TranslationProvider::Ollama),
                ProviderConfig::new(TranslationProvider::Anthropic),
            ],
            common: TranslationCommonConfig::default(),
        }
    }
}
