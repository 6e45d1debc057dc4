/*!
 * Speech synthesis for translated text.
 *
 * Speech backends accept only short pieces of text per request, so
 * `split_for_speech` cuts a translation into sentence-aligned pieces that
 * fit, splitting oversized sentences on word boundaries.
 */

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::SpeechError;
use crate::translation::chunker::pack_sentences;
use crate::translation::segmenter::{RuleBasedSegmenter, SentenceSegmenter};

pub mod google;

pub use self::google::GoogleSpeech;

/// Synthesized audio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Encoded audio bytes
    pub data: Bytes,
    /// MIME type of `data`
    pub mime: &'static str,
}

impl AudioClip {
    /// Wrap MP3-encoded bytes
    pub fn mp3(data: Bytes) -> Self {
        Self {
            data,
            mime: "audio/mpeg",
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Capability that turns text in a given language into audio
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioClip, SpeechError>;
}

/// Split `text` into pieces of at most `max_chars` characters
///
/// Sentences are kept whole when they fit and packed together greedily.
/// Longer sentences are split between words, and a single word longer than
/// the limit is cut between characters.
pub fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let segmenter = RuleBasedSegmenter::new();

    let pieces: Vec<String> = segmenter
        .split(text)
        .into_iter()
        .flat_map(|sentence| split_long_sentence(sentence, max_chars))
        .collect();

    // pack_sentences keeps chunks strictly below its budget including the
    // trailing space, so `max_chars + 2` yields chunks of at most `max_chars`.
    pack_sentences(pieces.iter().map(String::as_str), max_chars + 2)
}

fn split_long_sentence(sentence: &str, max_chars: usize) -> Vec<String> {
    if sentence.chars().count() <= max_chars {
        return vec![sentence.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in sentence.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                pieces.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            pieces.extend(chars.chunks(max_chars).map(|part| part.iter().collect::<String>()));
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            pieces.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}
