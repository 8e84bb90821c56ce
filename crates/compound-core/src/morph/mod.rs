//! Morpheme splits derived from analyzer output.
//!
//! An analysis line such as `Arbeit<NN><->s<#>Markt<+NN><Masc><Nom><Sg>` is
//! turned into a `MorphemeSplit` `[(Arbeit, s), (markt, "")]`: roots paired
//! with the linking element that follows them.

mod cache;
mod context;
mod parse;

pub use cache::AnalysisCache;
pub use context::AnalysisContext;
pub use parse::{AnalysisParser, ParseSkip};

use std::fmt;

/// A root and the juncture that follows it in the surface word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Morpheme {
    pub root: String,
    pub juncture: String,
}

impl Morpheme {
    pub fn new(root: impl Into<String>, juncture: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            juncture: juncture.into(),
        }
    }
}

/// Ordered morphemes of one analysis. The last morpheme has no juncture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MorphemeSplit(Vec<Morpheme>);

impl MorphemeSplit {
    pub fn new(mut morphemes: Vec<Morpheme>) -> Self {
        if let Some(last) = morphemes.last_mut() {
            last.juncture.clear();
        }
        Self(morphemes)
    }

    /// The whole word as a single morpheme.
    pub fn trivial(word: &str) -> Self {
        Self(vec![Morpheme::new(word, "")])
    }

    pub fn morphemes(&self) -> &[Morpheme] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MorphemeSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(&m.root)?;
            if !m.juncture.is_empty() {
                write!(f, "+{}", m.juncture)?;
            }
        }
        Ok(())
    }
}
