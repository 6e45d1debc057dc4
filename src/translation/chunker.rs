/*!
 * Sentence-aligned chunking of long input.
 *
 * Backends cap the size of a single request, so input is packed greedily
 * into chunks of whole sentences. A sentence is never split: one that is
 * longer than the budget on its own becomes its own oversized chunk.
 */

use log::debug;

use super::segmenter::{RuleBasedSegmenter, SentenceSegmenter};

/// Default character budget for a single translation request
pub const DEFAULT_MAX_CHARS: usize = 4500;

/// Split `text` into sentence-aligned chunks using the default segmenter
///
/// Lengths are measured in characters, not bytes. Every chunk is strictly
/// shorter than `max_chars` unless it holds a single sentence that is
/// oversized on its own.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    split_into_chunks_with(&RuleBasedSegmenter::new(), text, max_chars)
}

/// Split `text` into chunks using a caller-supplied segmenter
pub fn split_into_chunks_with<S>(segmenter: &S, text: &str, max_chars: usize) -> Vec<String>
where
    S: SentenceSegmenter + ?Sized,
{
    let sentences = segmenter.split(text);
    let chunks = pack_sentences(sentences.iter().copied(), max_chars);
    debug!(
        "Split {} characters into {} sentences and {} chunks (budget {})",
        text.chars().count(),
        sentences.len(),
        chunks.len(),
        max_chars
    );
    chunks
}

/// Greedily pack ordered sentences into chunks
///
/// A sentence joins the current chunk while
/// `current + sentence + 1 < max_chars`, counting the joining space.
/// Otherwise the current chunk is closed and the sentence opens the next one.
pub fn pack_sentences<'a, I>(sentences: I, max_chars: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in sentences {
        let sentence_len = sentence.chars().count();

        if current_len + sentence_len + 1 < max_chars {
            current.push_str(sentence);
            current.push(' ');
            current_len += sentence_len + 1;
            continue;
        }

        let closed = current.trim();
        if !closed.is_empty() {
            chunks.push(closed.to_string());
        } else if sentence_len + 1 >= max_chars {
            debug!("Sentence of {} characters exceeds the budget, placing it in its own chunk", sentence_len);
        }

        current.clear();
        current.push_str(sentence);
        current.push(' ');
        current_len = sentence_len + 1;
    }

    let closed = current.trim();
    if !closed.is_empty() {
        chunks.push(closed.to_string());
    }

    chunks
}
