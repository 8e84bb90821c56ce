use super::{resolve_segment, Decomposition, Piece};
use crate::freq::FrequencyTable;
use crate::morph::{Morpheme, MorphemeSplit};
use crate::settings::SplitSettings;

enum Frame {
    /// `split.morphemes()[offset..]` remains to be grouped after `pieces`.
    Open { offset: usize, pieces: Vec<Piece> },
    Done(Vec<Piece>),
}

/// Every grouping of consecutive morphemes into attested segments, for each
/// analyzer split in turn.
///
/// A group of morphemes becomes one segment when its text (the roots and
/// junctures of all but its last morpheme, then the last root) is attested.
/// The last morpheme's juncture follows the segment. Shorter groups are tried
/// first.
pub struct MorphDecompositions<'a> {
    splits: &'a [MorphemeSplit],
    table: &'a FrequencyTable,
    settings: &'a SplitSettings,
    next_split: usize,
    current: Option<&'a [Morpheme]>,
    stack: Vec<Frame>,
}

impl<'a> MorphDecompositions<'a> {
    pub fn new(
        splits: &'a [MorphemeSplit],
        table: &'a FrequencyTable,
        settings: &'a SplitSettings,
    ) -> Self {
        Self {
            splits,
            table,
            settings,
            next_split: 0,
            current: None,
            stack: Vec::new(),
        }
    }

    fn group_text(morphemes: &[Morpheme]) -> String {
        let mut text = String::new();
        let Some((last, init)) = morphemes.split_last() else {
            return text;
        };
        for m in init {
            text.push_str(&m.root);
            text.push_str(&m.juncture);
        }
        text.push_str(&last.root);
        text
    }

    fn expand(&mut self, morphemes: &[Morpheme], offset: usize, pieces: Vec<Piece>) {
        let rest = &morphemes[offset..];
        let mut children = Vec::new();
        for len in 1..=rest.len() {
            let group = &rest[..len];
            let Some(segment) =
                resolve_segment(self.table, self.settings, &Self::group_text(group))
            else {
                continue;
            };
            let mut next = pieces.clone();
            next.push(Piece::Segment(segment));
            if len == rest.len() {
                children.push(Frame::Done(next));
            } else {
                next.push(Piece::Juncture(group[len - 1].juncture.clone()));
                children.push(Frame::Open {
                    offset: offset + len,
                    pieces: next,
                });
            }
        }
        self.stack.extend(children.into_iter().rev());
    }
}

impl Iterator for MorphDecompositions<'_> {
    type Item = Decomposition;

    fn next(&mut self) -> Option<Decomposition> {
        loop {
            match self.stack.pop() {
                Some(Frame::Done(pieces)) => return Some(Decomposition::new(pieces)),
                Some(Frame::Open { offset, pieces }) => {
                    if let Some(morphemes) = self.current {
                        self.expand(morphemes, offset, pieces);
                    }
                }
                None => {
                    let split = self.splits.get(self.next_split)?;
                    self.next_split += 1;
                    if split.is_empty() {
                        continue;
                    }
                    self.current = Some(split.morphemes());
                    self.stack.push(Frame::Open {
                        offset: 0,
                        pieces: Vec::new(),
                    });
                }
            }
        }
    }
}
