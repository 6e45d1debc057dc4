/*!
 * Sentence boundary detection.
 *
 * Chunking never splits a sentence, so the quality of these boundaries
 * decides how natural each translation request reads. The default
 * segmenter is rule based: it breaks after terminal punctuation followed by
 * whitespace, after CJK full stops, and at paragraph breaks, while skipping
 * common abbreviations, initials, and boundaries followed by a lowercase word.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Splits text into an ordered sequence of non-empty sentences
pub trait SentenceSegmenter: Send + Sync {
    /// Return the sentences of `text` in order, each trimmed and non-empty
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Candidate boundaries: Latin terminators need trailing whitespace, CJK
/// terminators do not, blank lines always end a sentence.
static BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?…]+["'”’»)\]]*\s+|[。！？]+["'”’」』)）]*\s*|\n[ \t]*\n\s*"#)
        .expect("sentence boundary pattern is valid")
});

/// Abbreviations that practically never end a sentence
static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "e.g", "i.e", "cf",
        "approx", "dept", "lt", "sgt", "capt", "u.s", "u.k", "a.m", "p.m",
    ]
    .into_iter()
    .collect()
});

/// Abbreviations that are also ordinary words or often end a sentence
///
/// These only hold a sentence together when a number or an initial follows,
/// as in "No. 5" or "Mar. 12".
static AMBIGUOUS_ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "no", "co", "est", "fig", "vol", "al", "etc", "inc", "ltd", "corp", "gen", "col", "rev",
        "hon", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
    ]
    .into_iter()
    .collect()
});

/// Rule based segmenter used when no other segmenter is supplied
#[derive(Debug, Clone, Default)]
pub struct RuleBasedSegmenter;

impl RuleBasedSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Whether a candidate boundary should be ignored
    fn is_false_boundary(before: &str, terminator: &str, after: &str) -> bool {
        // Only a single period can belong to an abbreviation or an initial
        if terminator.trim_end() != "." {
            return false;
        }

        let mut words = before.rsplit(char::is_whitespace).filter(|w| !w.is_empty());
        let last_raw = words
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric());
        let previous = words.next().unwrap_or("");
        let last_word = last_raw.to_lowercase();
        let next = after.split_whitespace().next().unwrap_or("");

        if ABBREVIATIONS.contains(last_word.as_str()) {
            return true;
        }

        if AMBIGUOUS_ABBREVIATIONS.contains(last_word.as_str()) {
            return next.starts_with(|c: char| c.is_ascii_digit()) || is_initial(next);
        }

        // Initials such as "J. R. R. Tolkien" or "John F. Kennedy", but not "an A."
        if is_single_capital(last_raw) {
            let after_name = previous
                .trim_start_matches(|c: char| !c.is_alphanumeric())
                .starts_with(char::is_uppercase);
            if after_name || is_initial(previous) || is_initial(next) {
                return true;
            }
        }

        // A lowercase continuation is almost never a new sentence
        after.chars().next().is_some_and(|c| c.is_lowercase())
    }
}

fn is_single_capital(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

/// Whether `token` is a capital initial like "R."
fn is_initial(token: &str) -> bool {
    token
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .strip_suffix('.')
        .is_some_and(is_single_capital)
}

impl SentenceSegmenter for RuleBasedSegmenter {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in BOUNDARY.find_iter(text) {
            let matched = boundary.as_str();
            let is_paragraph_break = matched.trim().is_empty() || matched.matches('\n').count() >= 2;

            if !is_paragraph_break
                && Self::is_false_boundary(&text[start..boundary.start()], matched, &text[boundary.end()..])
            {
                continue;
            }

            let sentence = text[start..boundary.end()].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = boundary.end();
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest);
        }

        sentences
    }
}
