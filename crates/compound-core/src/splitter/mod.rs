//! Choosing the best decomposition of a word.
//!
//! Candidates come from one of two sources:
//! - `Source::Corpus`: every segmentation into frequency-attested substrings
//!   joined by allowed junctures (`SegmentationLattice`)
//! - `Source::Morphology`: coarsenings of the analyzer's morpheme splits into
//!   frequency-attested groups (`MorphDecompositions`)
//!
//! Each candidate is scored by the geometric mean of its segment counts and
//! the best one replaces the word if it beats the unsplit baseline.

mod coarsen;
mod lattice;
mod score;
#[cfg(test)]
mod tests;

pub use coarsen::MorphDecompositions;
pub use lattice::{LatticeArc, LatticeDecompositions, SegmentationLattice};
pub use score::{geometric_mean, Score, Selector, BASELINE};

use std::fmt;

use tracing::{debug, debug_span};

use crate::freq::FrequencyTable;
use crate::morph::MorphemeSplit;
use crate::settings::SplitSettings;

/// A frequency-attested part of a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Text as it appears in the word (or in the analysis).
    pub surface: String,
    /// Text to emit: the truecased spelling, or the surface text without
    /// truecasing.
    pub form: String,
    pub freq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Segment(Segment),
    /// Linking element between two segments; not scored.
    Juncture(String),
}

/// Segments interleaved with junctures: `seg (junc seg)*`.
///
/// A juncture piece sits between every pair of segments, even when the
/// linking element is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    pieces: Vec<Piece>,
}

impl Decomposition {
    pub fn new(pieces: Vec<Piece>) -> Self {
        Self { pieces }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.pieces.iter().filter_map(|p| match p {
            Piece::Segment(s) => Some(s),
            Piece::Juncture(_) => None,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    /// Segments (as found in the word) and junctures concatenated.
    pub fn surface(&self) -> String {
        self.pieces
            .iter()
            .map(|p| match p {
                Piece::Segment(s) => s.surface.as_str(),
                Piece::Juncture(j) => j.as_str(),
            })
            .collect()
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, piece) in self.pieces.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match piece {
                Piece::Segment(s) => write!(f, "{}({})", s.form, s.freq)?,
                Piece::Juncture(j) => write!(f, "@{j}@")?,
            }
        }
        Ok(())
    }
}

/// Look up a candidate segment. `None` unless its lowercase form reaches
/// `min_count`.
pub fn resolve_segment(
    table: &FrequencyTable,
    settings: &SplitSettings,
    surface: &str,
) -> Option<Segment> {
    let lower = surface.to_lowercase();
    let count = table.attested(&lower, settings.min_count)?;
    debug!(segment = surface, count, "matching segment");
    if settings.truecase {
        let key = table.truecase(&lower).unwrap_or(&lower).to_string();
        let freq = table.count(&key).unwrap_or(count);
        Some(Segment {
            surface: surface.to_string(),
            form: key,
            freq,
        })
    } else {
        Some(Segment {
            surface: surface.to_string(),
            form: surface.to_string(),
            freq: count,
        })
    }
}

/// Where candidate decompositions come from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// Corpus-only segmentation lattice.
    Corpus,
    /// Cached analyzer splits of the word.
    Morphology(&'a [MorphemeSplit]),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SplitOutcome {
    /// Frequent enough to be left alone.
    Frequent,
    /// No candidate beat the unsplit word.
    Unsplit,
    Split {
        decomposition: Decomposition,
        score: Score,
    },
}

impl SplitOutcome {
    pub fn decomposition(&self) -> Option<&Decomposition> {
        match self {
            SplitOutcome::Split { decomposition, .. } => Some(decomposition),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub decomposition: Decomposition,
    pub score: Score,
}

/// Stateless splitting over a frequency table and split settings.
pub struct Splitter<'a> {
    table: &'a FrequencyTable,
    settings: &'a SplitSettings,
}

impl<'a> Splitter<'a> {
    pub fn new(table: &'a FrequencyTable, settings: &'a SplitSettings) -> Self {
        Self { table, settings }
    }

    pub fn is_frequent(&self, word: &str) -> bool {
        self.table.is_frequent(word, self.settings.max_count)
    }

    /// Best decomposition of `word`, or `Unsplit`.
    ///
    /// Frequent words are not checked here; callers skip them before asking
    /// the analyzer.
    pub fn split(&self, word: &str, source: Source<'_>) -> SplitOutcome {
        let _span = debug_span!("split", word).entered();
        let mut selector = Selector::new(self.settings.fewest);
        self.for_each_candidate(word, source, |candidate| {
            let (score, best) = selector.offer(candidate);
            debug!(%score, best, "considered split");
        });
        debug!(considered = selector.considered());
        match selector.into_best() {
            Some((decomposition, score)) => SplitOutcome::Split {
                decomposition,
                score,
            },
            None => SplitOutcome::Unsplit,
        }
    }

    /// Every considered candidate with its score, in enumeration order.
    pub fn scored_candidates(&self, word: &str, source: Source<'_>) -> Vec<ScoredCandidate> {
        let mut out = Vec::new();
        self.for_each_candidate(word, source, |decomposition| {
            let score = Score::of(&decomposition);
            out.push(ScoredCandidate {
                decomposition,
                score,
            });
        });
        out
    }

    fn for_each_candidate(
        &self,
        word: &str,
        source: Source<'_>,
        mut f: impl FnMut(Decomposition),
    ) {
        let cap = self.settings.max_hypotheses;
        match source {
            Source::Corpus => {
                let lattice = SegmentationLattice::build(word, self.table, self.settings);
                lattice.decompositions().take(cap).for_each(&mut f);
            }
            Source::Morphology(splits) => {
                MorphDecompositions::new(splits, self.table, self.settings)
                    .take(cap)
                    .for_each(&mut f);
            }
        }
    }
}
