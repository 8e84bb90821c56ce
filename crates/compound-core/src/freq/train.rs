use std::collections::HashMap;
use std::io::{self, BufRead};

use tracing::debug;

use crate::syntax::line_words;

/// Word counts accumulated over a corpus, in order of first occurrence.
#[derive(Debug, Default)]
pub struct CorpusCounts {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl CorpusCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, word: &str) {
        match self.index.get(word) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push((word.to_string(), 1));
            }
        }
    }

    /// Count every word of one corpus line.
    pub fn add_line(&mut self, line: &str, syntax: bool) {
        for word in line_words(line, syntax) {
            self.add(word);
        }
    }

    /// Count a whole corpus, one sentence (or tree) per line.
    pub fn from_reader<R: BufRead>(reader: R, syntax: bool) -> io::Result<Self> {
        let mut counts = Self::new();
        let mut lines = 0usize;
        for line in reader.lines() {
            counts.add_line(&line?, syntax);
            lines += 1;
        }
        debug!(lines, types = counts.len(), "corpus counted");
        Ok(counts)
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.index.get(word).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(String, u64)> {
        self.entries
    }
}
