//! Output of a split decision.
//!
//! Flat rendering joins segments with spaces; junctures are omitted, written
//! as `@s@` tokens, or merged into the preceding segment (`arbeits@@`).
//! `tree` renders the same decision as a Moses XML fragment.

mod tree;

pub use tree::render_tree;

use crate::settings::JunctureMode;
use crate::splitter::{Decomposition, Piece, SplitOutcome};

/// Flat tokens of a decomposition.
pub fn flat_tokens(decomposition: &Decomposition, mode: JunctureMode) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for piece in decomposition.pieces() {
        match piece {
            Piece::Segment(s) => tokens.push(s.form.clone()),
            Piece::Juncture(j) => match mode {
                JunctureMode::Omit => {}
                JunctureMode::Write => tokens.push(format!("@{j}@")),
                JunctureMode::Merge => {
                    if let Some(last) = tokens.last_mut() {
                        last.push_str(j);
                        last.push_str("@@");
                    }
                }
            },
        }
    }
    tokens
}

/// Render a word's outcome as space-separated tokens. Unsplit and frequent
/// words come back verbatim.
pub fn render_flat(word: &str, outcome: &SplitOutcome, mode: JunctureMode) -> String {
    match outcome.decomposition() {
        Some(d) => flat_tokens(d, mode).join(" "),
        None => word.to_string(),
    }
}
