/*!
 * # LinguaNova - chunked multi-language text translation
 *
 * A Rust library for translating long text into several languages at once.
 *
 * ## Features
 *
 * - Sentence-aware chunking under a per-request character budget
 * - Translate chunks using various backends:
 *   - Google Translate (public endpoint)
 *   - Ollama (local LLM)
 *   - Anthropic API
 * - Fail-fast reassembly per target language
 * - Optional speech synthesis with downloadable MP3 output
 * - ISO 639-1 and ISO 639-2 language code support, plus English names
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: Chunked document translation:
 *   - `translation::segmenter`: Sentence boundary detection
 *   - `translation::chunker`: Sentence packing under a budget
 *   - `translation::core`: The `Translator` capability and service
 *   - `translation::cache`: Caching of chunk translations
 *   - `translation::orchestrator`: Per-language translation of a document
 * - `speech`: Speech synthesis of translated text
 * - `history`: Bounded history of recent translations
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for the translation backends:
 *   - `providers::google`: Google Translate client
 *   - `providers::ollama`: Ollama API client
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::mock`: In-process backends for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod history;
pub mod language_utils;
pub mod providers;
pub mod speech;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{ProviderError, SpeechError, TranslationError};
pub use history::TranslationHistory;
pub use language_utils::SourceLanguage;
pub use translation::{
    DocumentOptions, TranslationRequest, TranslationResult, Translator, split_into_chunks, translate_document,
};
