/*!
 * Tests for sentence-aligned chunking
 */

use linguanova::translation::chunker::{DEFAULT_MAX_CHARS, split_into_chunks};
use linguanova::translation::segmenter::{RuleBasedSegmenter, SentenceSegmenter};
use crate::common;

fn sentences(text: &str) -> Vec<String> {
    RuleBasedSegmenter::new()
        .split(text)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Every sentence appears exactly once, in order
#[test]
fn test_split_into_chunks_withSampleDocument_shouldCoverAllSentencesInOrder() {
    let text = common::sample_document();

    for max_chars in [30, 60, 120, DEFAULT_MAX_CHARS] {
        let chunks = split_into_chunks(&text, max_chars);
        let rejoined: Vec<String> = chunks.iter().flat_map(|chunk| sentences(chunk)).collect();
        assert_eq!(rejoined, sentences(&text), "budget {}", max_chars);
    }
}

/// Chunks stay under budget unless they hold one oversized sentence
#[test]
fn test_split_into_chunks_withSmallBudget_shouldRespectBudget() {
    let text = common::sample_document();
    let max_chars = 50;

    for chunk in split_into_chunks(&text, max_chars) {
        let len = chunk.chars().count();
        assert!(
            len < max_chars || sentences(&chunk).len() == 1,
            "chunk of {} chars holds several sentences: {:?}",
            len,
            chunk
        );
    }
}

#[test]
fn test_split_into_chunks_withAnyBudget_shouldNeverEmitEmptyChunks() {
    let text = format!("{} {}", common::sentence_of_len(5000), common::sample_document());

    for max_chars in [1, 10, 100, DEFAULT_MAX_CHARS] {
        let chunks = split_into_chunks(&text, max_chars);
        assert!(!chunks.is_empty());
        assert!(chunks.iter().all(|c| !c.trim().is_empty()), "budget {}", max_chars);
    }
}

#[test]
fn test_split_into_chunks_calledTwice_shouldBeDeterministic() {
    let text = common::sample_document();
    assert_eq!(split_into_chunks(&text, 80), split_into_chunks(&text, 80));
}

#[test]
fn test_split_into_chunks_withSingleShortSentence_shouldReturnOneChunk() {
    assert_eq!(split_into_chunks("Hello world.", DEFAULT_MAX_CHARS), vec!["Hello world.".to_string()]);
}

#[test]
fn test_split_into_chunks_withThreeLongSentences_shouldPackFirstTwo() {
    let s1 = common::sentence_of_len(2000);
    let s2 = common::sentence_of_len(2000);
    let s3 = common::sentence_of_len(2000);
    let text = format!("{} {} {}", s1, s2, s3);

    let chunks = split_into_chunks(&text, 4500);

    assert_eq!(chunks, vec![format!("{} {}", s1, s2), s3]);
}

#[test]
fn test_split_into_chunks_withOversizedSentence_shouldKeepItWhole() {
    let sentence = common::sentence_of_len(5000);

    let chunks = split_into_chunks(&sentence, 4500);

    assert_eq!(chunks, vec![sentence]);
}

#[test]
fn test_split_into_chunks_withOversizedSentenceInMiddle_shouldIsolateIt() {
    let long = common::sentence_of_len(200);
    let text = format!("Short one. {} Short two.", long);

    let chunks = split_into_chunks(&text, 100);

    assert_eq!(chunks, vec!["Short one.".to_string(), long, "Short two.".to_string()]);
}

#[test]
fn test_split_into_chunks_withMultibyteText_shouldCountCharacters() {
    // 10 characters but 18 bytes per sentence
    let text = "Привет ми. Привет ми.";

    let chunks = split_into_chunks(text, 23);

    assert_eq!(chunks, vec![text.to_string()]);
}

#[test]
fn test_split_into_chunks_withWhitespaceOnly_shouldReturnNothing() {
    assert!(split_into_chunks(" \n\t ", DEFAULT_MAX_CHARS).is_empty());
}

#[test]
fn test_split_into_chunks_withWordsLikeAbbreviations_shouldStillSplitSentences() {
    let chunks = split_into_chunks("I said no. Then he left.", 15);

    assert_eq!(chunks, vec!["I said no.".to_string(), "Then he left.".to_string()]);
}
