/*!
 * Bounded history of recent translations.
 *
 * The controller records every successful document translation here. Only
 * the most recent entries are kept; older ones are dropped as new ones
 * arrive.
 */

use chrono::{DateTime, Local};
use std::collections::VecDeque;

use crate::translation::TranslationResult;

/// Number of translations remembered by default
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Characters of input kept in an entry's preview
const PREVIEW_CHARS: usize = 60;

/// One remembered translation
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// When the translation finished
    pub timestamp: DateTime<Local>,
    /// Source language as requested (code or "auto")
    pub source_language: String,
    /// Start of the input text
    pub input_preview: String,
    /// Characters in the full input
    pub input_chars: usize,
    /// Translated text per language
    pub result: TranslationResult,
}

impl HistoryEntry {
    pub fn new(source_language: impl Into<String>, input: &str, result: TranslationResult) -> Self {
        let input_chars = input.chars().count();
        let mut input_preview: String = input.trim().chars().take(PREVIEW_CHARS).collect();
        if input_chars > PREVIEW_CHARS {
            input_preview.push_str("...");
        }

        Self {
            timestamp: Local::now(),
            source_language: source_language.into(),
            input_preview,
            input_chars,
            result,
        }
    }

    /// Target languages of this entry, in request order
    pub fn target_languages(&self) -> Vec<&str> {
        self.result.languages()
    }

    /// Single-line description used when listing the history
    pub fn summary(&self) -> String {
        format!(
            "[{}] {} -> {} ({} chars): {}",
            self.timestamp.format("%H:%M:%S"),
            self.source_language,
            self.target_languages().join(", "),
            self.input_chars,
            self.input_preview.replace('\n', " ")
        )
    }
}

/// Ring buffer of the most recent translations
#[derive(Debug, Clone)]
pub struct TranslationHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl TranslationHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a history keeping at most `capacity` entries (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an entry, evicting the oldest one when full
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for TranslationHistory {
    fn default() -> Self {
        Self::new()
    }
}
