use std::collections::{HashMap, VecDeque};

use super::MorphemeSplit;

/// Memoized morpheme splits per wordform.
///
/// Unbounded by default; with a capacity, the oldest wordforms are evicted
/// first once the bound is exceeded.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    entries: HashMap<String, Vec<MorphemeSplit>>,
    order: VecDeque<String>,
    capacity: Option<usize>,
}

impl AnalysisCache {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    pub fn get(&self, word: &str) -> Option<&[MorphemeSplit]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Store the splits of a wordform: the trivial split first, then every
    /// distinct analysed split.
    pub fn insert(&mut self, word: &str, analysed: Vec<MorphemeSplit>) -> &[MorphemeSplit] {
        let mut splits = vec![MorphemeSplit::trivial(word)];
        for split in analysed {
            if !splits.contains(&split) {
                splits.push(split);
            }
        }

        if !self.entries.contains_key(word) {
            self.order.push_back(word.to_string());
        }
        self.entries.insert(word.to_string(), splits);
        self.evict();
        self.entries.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    fn evict(&mut self) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while self.entries.len() > capacity.max(1) {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
