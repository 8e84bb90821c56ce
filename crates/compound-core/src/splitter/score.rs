use std::fmt;

use super::Decomposition;

/// Score of the unsplit word. A decomposition has to beat it to be used.
pub const BASELINE: f64 = 1.0;

/// Geometric mean of segment frequencies.
///
/// The product is computed exactly while it fits in a `u128`; longer or
/// larger products fall back to summing logarithms.
pub fn geometric_mean(freqs: &[u64]) -> f64 {
    if freqs.is_empty() {
        return 0.0;
    }
    let n = freqs.len() as f64;
    let exact = freqs
        .iter()
        .try_fold(1u128, |acc, &f| acc.checked_mul(u128::from(f)));
    match exact {
        Some(product) => (product as f64).powf(1.0 / n),
        None => (freqs.iter().map(|&f| (f as f64).ln()).sum::<f64>() / n).exp(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub segments: usize,
    pub mean: f64,
}

impl Score {
    pub fn of(decomposition: &Decomposition) -> Self {
        let freqs: Vec<u64> = decomposition.segments().map(|s| s.freq).collect();
        Self {
            segments: freqs.len(),
            mean: geometric_mean(&freqs),
        }
    }

    /// Scores at or below the baseline never replace the unsplit word.
    pub fn is_eligible(&self) -> bool {
        self.mean > BASELINE
    }

    /// Strict comparison. With `fewest`, the key is (-segments, mean).
    pub fn beats(&self, other: &Score, fewest: bool) -> bool {
        if fewest && self.segments != other.segments {
            return self.segments < other.segments;
        }
        self.mean > other.mean
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} ({} segments)", self.mean, self.segments)
    }
}

/// Running best over the candidates of one word.
#[derive(Debug)]
pub struct Selector {
    fewest: bool,
    best: Option<(Decomposition, Score)>,
    considered: usize,
}

impl Selector {
    pub fn new(fewest: bool) -> Self {
        Self {
            fewest,
            best: None,
            considered: 0,
        }
    }

    /// Returns the candidate's score and whether it became the new best.
    pub fn offer(&mut self, candidate: Decomposition) -> (Score, bool) {
        self.considered += 1;
        let score = Score::of(&candidate);
        let replace = score.is_eligible()
            && match &self.best {
                None => true,
                Some((_, best)) => score.beats(best, self.fewest),
            };
        if replace {
            self.best = Some((candidate, score));
        }
        (score, replace)
    }

    pub fn considered(&self) -> usize {
        self.considered
    }

    pub fn into_best(self) -> Option<(Decomposition, Score)> {
        self.best
    }
}
