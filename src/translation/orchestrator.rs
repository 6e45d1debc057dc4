/*!
 * Document-level translation orchestration.
 *
 * A document is chunked once, then every chunk is sent to the translator
 * for each requested target language and the translated chunks are joined
 * back together. The first failing chunk aborts the whole request.
 */

use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, info};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::TranslationError;
use crate::language_utils::{SourceLanguage, resolve_language};
use super::chunker::{DEFAULT_MAX_CHARS, split_into_chunks};
use super::core::{TranslationRequest, Translator};

/// Separator placed between translated chunks
pub const DEFAULT_SEPARATOR: &str = "\n\n";

/// Options controlling how a document is chunked and reassembled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Character budget of a single chunk
    pub max_chars: usize,
    /// Text placed between translated chunks
    pub separator: String,
    /// Chunk requests kept in flight per language; 1 means sequential
    pub concurrent_requests: usize,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            separator: DEFAULT_SEPARATOR.to_string(),
            concurrent_requests: 1,
        }
    }
}

impl DocumentOptions {
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_concurrent_requests(mut self, concurrent_requests: usize) -> Self {
        self.concurrent_requests = concurrent_requests;
        self
    }
}

/// Translated text per target language, in request order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationResult {
    translations: Vec<(String, String)>,
}

impl TranslationResult {
    /// Translated text for a language code
    pub fn get(&self, language: &str) -> Option<&str> {
        self.translations
            .iter()
            .find(|(code, _)| code == language)
            .map(|(_, text)| text.as_str())
    }

    /// Iterate over (language, text) pairs in request order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.translations.iter().map(|(code, text)| (code.as_str(), text.as_str()))
    }

    pub fn languages(&self) -> Vec<&str> {
        self.translations.iter().map(|(code, _)| code.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    fn insert(&mut self, language: String, text: String) {
        self.translations.push((language, text));
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for TranslationResult {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        let mut result = Self::default();
        for (language, text) in iter {
            result.insert(language.into(), text.into());
        }
        result
    }
}

impl IntoIterator for TranslationResult {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.translations.into_iter()
    }
}

/// Translate `text` into every language of `targets`
///
/// `source` is a language code or name, or `auto` to let the backend detect
/// it. Target codes are normalized to ISO 639-1 where one exists and
/// duplicates are dropped. All languages are validated before the first
/// backend call.
pub async fn translate_document<T, S>(
    translator: &T,
    text: &str,
    source: &str,
    targets: &[S],
    options: &DocumentOptions,
) -> Result<TranslationResult, TranslationError>
where
    T: Translator + ?Sized,
    S: AsRef<str>,
{
    translate_document_with_progress(translator, text, source, targets, options, |_, _| {}).await
}

/// Same as [`translate_document`], reporting `(completed, total)` chunk calls
/// after each successful chunk
pub async fn translate_document_with_progress<T, S, F>(
    translator: &T,
    text: &str,
    source: &str,
    targets: &[S],
    options: &DocumentOptions,
    progress: F,
) -> Result<TranslationResult, TranslationError>
where
    T: Translator + ?Sized,
    S: AsRef<str>,
    F: Fn(usize, usize) + Send + Sync,
{
    if text.trim().is_empty() {
        return Err(TranslationError::EmptyInput);
    }
    if targets.is_empty() {
        return Err(TranslationError::NoTargetLanguages);
    }

    let source = parse_source(source)?;
    let targets = resolve_targets(targets)?;

    let chunks = split_into_chunks(text, options.max_chars);
    if chunks.is_empty() {
        return Err(TranslationError::EmptyInput);
    }

    let total = chunks.len() * targets.len();
    let completed = AtomicUsize::new(0);
    let concurrency = options.concurrent_requests.max(1);

    info!(
        "Translating {} chunks from {} into {} language(s): {}",
        chunks.len(),
        source,
        targets.len(),
        targets.join(", ")
    );

    let mut result = TranslationResult::default();
    for target in targets {
        let translated: Vec<String> = stream::iter(chunks.iter().enumerate())
            .map(|(chunk_index, chunk)| {
                let request = TranslationRequest::new(chunk.as_str(), source.clone(), target.as_str());
                let target = target.as_str();
                let completed = &completed;
                let progress = &progress;
                async move {
                    debug!(
                        "Chunk {} ({} chars) -> {}",
                        chunk_index,
                        request.text().chars().count(),
                        target
                    );
                    let translated = translator.translate(&request).await.map_err(|source| {
                        TranslationError::TranslationFailure {
                            language: target.to_string(),
                            chunk_index,
                            source,
                        }
                    })?;
                    progress(completed.fetch_add(1, Ordering::SeqCst) + 1, total);
                    Ok::<_, TranslationError>(translated)
                }
            })
            .buffered(concurrency)
            .try_collect()
            .await?;

        info!("Finished {} ({} chunks)", target, translated.len());
        result.insert(target, translated.join(&options.separator));
    }

    Ok(result)
}

fn parse_source(source: &str) -> Result<SourceLanguage, TranslationError> {
    source.parse::<SourceLanguage>().map_err(|_| TranslationError::UnsupportedLanguage {
        code: source.to_string(),
    })
}

fn resolve_targets<S: AsRef<str>>(targets: &[S]) -> Result<Vec<String>, TranslationError> {
    let mut resolved: Vec<String> = Vec::with_capacity(targets.len());
    for target in targets {
        let code = resolve_language(target.as_ref()).map_err(|_| TranslationError::UnsupportedLanguage {
            code: target.as_ref().to_string(),
        })?;
        if resolved.contains(&code) {
            debug!("Ignoring duplicate target language {}", code);
            continue;
        }
        resolved.push(code);
    }
    Ok(resolved)
}
