//! Corpus word frequencies and truecasing.
//!
//! `FrequencyTable` answers "how often was this (lowercased) word seen" and
//! "what is its most frequent spelling". It is built once from a model file
//! and read-only afterwards.

mod model_io;
mod train;

pub use model_io::{load_model, parse_model, write_model, ModelError};
pub use train::CorpusCounts;

use std::collections::HashMap;

pub struct FrequencyTable {
    counts: HashMap<String, u64>,
    /// lowercase → most frequent original spelling (only where they differ)
    truecase: HashMap<String, String>,
}

impl FrequencyTable {
    /// Build the table from model counts in file order.
    ///
    /// Every key is also made available in lowercase: a lowercase key takes
    /// the count of the spelling that reaches it last without being beaten by
    /// a strictly higher count, and that spelling becomes its truecase form.
    pub fn from_counts<I, S>(entries: I, truecase: bool) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut order = Vec::new();
        let mut counts: HashMap<String, u64> = HashMap::new();
        for (word, count) in entries {
            let word = word.into();
            if counts.insert(word.clone(), count).is_none() {
                order.push(word);
            }
        }

        let mut truecase_map = HashMap::new();
        for word in order {
            let count = counts[&word];
            let lower = word.to_lowercase();
            if counts.get(&lower).is_some_and(|&c| c > count) {
                continue;
            }
            counts.insert(lower.clone(), count);
            if truecase && lower != word {
                truecase_map.insert(lower, word);
            }
        }

        Self {
            counts,
            truecase: truecase_map,
        }
    }

    /// Count for an exact key.
    pub fn count(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    /// Count for a key, `None` unless it reaches `min_count`.
    pub fn attested(&self, word: &str, min_count: u64) -> Option<u64> {
        self.count(word).filter(|&c| c >= min_count)
    }

    /// Most frequent original spelling of a lowercase word, if it differs.
    pub fn truecase(&self, lower: &str) -> Option<&str> {
        self.truecase.get(lower).map(String::as_str)
    }

    /// Whether a word is frequent enough to be left alone.
    pub fn is_frequent(&self, word: &str, max_count: u64) -> bool {
        self.count(&word.to_lowercase())
            .is_some_and(|c| c >= max_count)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
