//! Forbidden-word detection and masking.
//!
//! Matching is whole-word and case-insensitive: a forbidden word only matches
//! when bounded by Unicode word boundaries on both sides, so "analisis" never
//! matches "anal". Each configured word compiles to its own regex, and the
//! configured order is preserved in detection results.

use std::collections::HashSet;

use courier_types::config::{DEFAULT_FORBIDDEN_WORDS, ServiceConfig};
use regex::{Captures, Regex};

/// Result of scanning a text for forbidden words.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Detection {
    pub found: bool,
    /// Matched forbidden words, in configured order (not position order).
    pub matches: Vec<String>,
}

#[derive(Debug, Clone)]
struct WordRule {
    word: String,
    pattern: Regex,
}

/// Word-list profanity filter.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    rules: Vec<WordRule>,
}

impl ContentFilter {
    /// Build a filter from a word list.
    ///
    /// Blank entries are skipped and case-insensitive duplicates are kept
    /// once (first spelling wins).
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut rules = Vec::new();

        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() || !seen.insert(word.to_lowercase()) {
                continue;
            }
            match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word))) {
                Ok(pattern) => rules.push(WordRule {
                    word: word.to_string(),
                    pattern,
                }),
                Err(e) => tracing::warn!(word, error = %e, "skipping unmatchable forbidden word"),
            }
        }

        Self { rules }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(&config.forbidden_words)
    }

    /// The active word list, in matching order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.word.as_str())
    }

    pub fn detect(&self, text: &str) -> Detection {
        let matches: Vec<String> = self
            .rules
            .iter()
            .filter(|r| r.pattern.is_match(text))
            .map(|r| r.word.clone())
            .collect();

        Detection {
            found: !matches.is_empty(),
            matches,
        }
    }

    /// Replace every whole-word occurrence with `*`, one per matched character.
    pub fn mask(&self, text: &str) -> String {
        let mut masked = text.to_string();
        for rule in &self.rules {
            let replaced = rule
                .pattern
                .replace_all(&masked, |caps: &Captures| "*".repeat(caps[0].chars().count()));
            masked = replaced.into_owned();
        }
        masked
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(DEFAULT_FORBIDDEN_WORDS)
    }
}
