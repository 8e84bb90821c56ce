use std::collections::BTreeMap;

use tracing::{debug, debug_span};

use super::{resolve_segment, Decomposition, Piece, Segment};
use crate::freq::FrequencyTable;
use crate::settings::SplitSettings;

/// Best way to reach an end boundary from one start boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticeArc {
    /// Linking element consumed at `start`, before the segment.
    pub juncture: String,
    pub segment: Segment,
}

/// Reachability over character boundaries of a word.
///
/// `arcs_by_end[end]` maps each start boundary to the highest-frequency arc
/// spanning `start..end`. Positions are char indices.
#[derive(Debug)]
pub struct SegmentationLattice {
    pub char_count: usize,
    pub arcs_by_end: Vec<BTreeMap<usize, LatticeArc>>,
}

impl SegmentationLattice {
    pub fn build(word: &str, table: &FrequencyTable, settings: &SplitSettings) -> Self {
        let char_count = word.chars().count();
        let _span = debug_span!("build_lattice", word, char_count).entered();
        // byte_offsets[i] = byte offset of char i, with one extra slot for the end
        let byte_offsets: Vec<usize> = word
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(word.len()))
            .collect();
        let mut arcs_by_end: Vec<BTreeMap<usize, LatticeArc>> =
            vec![BTreeMap::new(); char_count + 1];

        let min_size = settings.min_size.max(1);
        for end in min_size..=char_count {
            for start in 0..=(end - min_size) {
                if start > 0 && arcs_by_end[start].is_empty() {
                    continue;
                }
                for juncture in &settings.junctures {
                    if start == 0 && !juncture.is_empty() {
                        continue;
                    }
                    let seg_start = start + juncture.chars().count();
                    if seg_start >= end {
                        continue;
                    }
                    if word[byte_offsets[start]..byte_offsets[seg_start]] != *juncture {
                        continue;
                    }
                    let surface = &word[byte_offsets[seg_start]..byte_offsets[end]];
                    let Some(segment) = resolve_segment(table, settings, surface) else {
                        continue;
                    };
                    let keep = arcs_by_end[end]
                        .get(&start)
                        .map_or(true, |arc| segment.freq > arc.segment.freq);
                    if keep {
                        arcs_by_end[end].insert(
                            start,
                            LatticeArc {
                                juncture: juncture.clone(),
                                segment,
                            },
                        );
                    }
                }
            }
        }

        debug!(arc_count = arcs_by_end.iter().map(BTreeMap::len).sum::<usize>());
        Self {
            char_count,
            arcs_by_end,
        }
    }

    /// Whether some arc reaches the end of the word.
    pub fn has_decomposition(&self) -> bool {
        self.arcs_by_end
            .last()
            .is_some_and(|arcs| !arcs.is_empty())
    }

    /// Lazily walk back from the final boundary through every kept arc.
    ///
    /// Each call starts a fresh walk. Arcs are only locally best per boundary
    /// pair, so the paths are every combination of those choices rather than
    /// a single best path.
    pub fn decompositions(&self) -> LatticeDecompositions<'_> {
        let mut stack = Vec::new();
        if self.char_count > 0 && self.has_decomposition() {
            stack.push(Frame::Open {
                end: self.char_count,
                tail: Vec::new(),
            });
        }
        LatticeDecompositions {
            lattice: self,
            stack,
        }
    }
}

enum Frame {
    /// Pieces after `end` are known, in reverse order.
    Open { end: usize, tail: Vec<Piece> },
    Done(Vec<Piece>),
}

/// Depth-first iterator over lattice paths, smaller start boundaries first.
pub struct LatticeDecompositions<'a> {
    lattice: &'a SegmentationLattice,
    stack: Vec<Frame>,
}

impl Iterator for LatticeDecompositions<'_> {
    type Item = Decomposition;

    fn next(&mut self) -> Option<Decomposition> {
        while let Some(frame) = self.stack.pop() {
            let (end, tail) = match frame {
                Frame::Done(mut pieces) => {
                    pieces.reverse();
                    return Some(Decomposition::new(pieces));
                }
                Frame::Open { end, tail } => (end, tail),
            };
            // Push in reverse so the smallest start is expanded first.
            for (&start, arc) in self.lattice.arcs_by_end[end].iter().rev() {
                let mut pieces = tail.clone();
                pieces.push(Piece::Segment(arc.segment.clone()));
                if start == 0 {
                    self.stack.push(Frame::Done(pieces));
                } else {
                    pieces.push(Piece::Juncture(arc.juncture.clone()));
                    self.stack.push(Frame::Open { end: start, tail: pieces });
                }
            }
        }
        None
    }
}
