/*!
 * Chunked document translation.
 *
 * This module contains the core functionality for translating long text
 * into several languages. It is split into several submodules:
 *
 * - `segmenter`: Sentence boundary detection
 * - `chunker`: Greedy packing of sentences into size-bounded chunks
 * - `core`: The `Translator` capability and the config-driven service
 * - `cache`: Caching of chunk translations
 * - `orchestrator`: Per-language translation and reassembly of a document
 */

// Re-export main types for easier usage
pub use self::chunker::{DEFAULT_MAX_CHARS, split_into_chunks};
pub use self::core::{TranslationRequest, TranslationService, Translator, UsageStats};
pub use self::orchestrator::{
    DEFAULT_SEPARATOR, DocumentOptions, TranslationResult, translate_document,
    translate_document_with_progress,
};

// Submodules
pub mod cache;
pub mod chunker;
pub mod core;
pub mod orchestrator;
pub mod segmenter;
