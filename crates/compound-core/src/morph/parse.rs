use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{Morpheme, MorphemeSplit};

/// First `<+CLASS>` tag: the main word class.
static MAIN_CLASS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<\+(.*?)>").unwrap());
/// Tags counted by the morpheme-count heuristic.
static SEGMENT_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([A-Z#~]*?)>").unwrap());
/// `{ABC}-<TRUNC>` hyphenation markup.
static HYPHENATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(.+?)\}-(?:<TRUNC>)?").unwrap());
/// Lemma with boundaries: everything before the first `<+`.
static LEMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.+?)<\+").unwrap());
/// Any tag except the boundary tags `<#>`, `<~>`, `<->`.
static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([^#~-]+?)>").unwrap());
/// Boundary tags.
static BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([#~-])>").unwrap());

const COMPOUND_BOUNDARY: &str = "<#>";
const DERIVATION_BOUNDARY: &str = "<~>";
const JUNCTURE_BOUNDARY: &str = "<->";

/// Why an analysis line produced no split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseSkip {
    Empty,
    NoResult,
    NoClass,
    PresentParticiple,
    Punctuation,
    Capitalized,
    NoLemma,
    ClassNotSplittable(String),
    NoCompoundBoundary,
    Unsplittable,
}

/// Converts raw analyzer lines into morpheme splits.
#[derive(Debug, Clone)]
pub struct AnalysisParser {
    splittable_classes: Vec<String>,
    truecase: bool,
}

impl AnalysisParser {
    /// `truecase = false` drops analyses that only apply to a capitalized form.
    pub fn new(splittable_classes: Vec<String>, truecase: bool) -> Self {
        Self {
            splittable_classes,
            truecase,
        }
    }

    /// All distinct splits of `word` found in `lines`, in first-seen order.
    pub fn parse(&self, word: &str, lines: &[String]) -> Vec<MorphemeSplit> {
        let mut splits: Vec<MorphemeSplit> = Vec::new();
        for line in lines {
            match self.parse_line(word, line) {
                Ok(split) => {
                    if !splits.contains(&split) {
                        splits.push(split);
                    }
                }
                Err(reason) => debug!(word, line = line.as_str(), ?reason, "analysis skipped"),
            }
        }
        splits
    }

    pub fn parse_line(&self, word: &str, line: &str) -> Result<MorphemeSplit, ParseSkip> {
        if line.is_empty() {
            return Err(ParseSkip::Empty);
        }
        if line.starts_with("no result") {
            return Err(ParseSkip::NoResult);
        }

        let class = MAIN_CLASS
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or(ParseSkip::NoClass)?;
        if class == "V" && line.contains("<PPres>") {
            return Err(ParseSkip::PresentParticiple);
        }
        if class == "PUNCT" {
            return Err(ParseSkip::Punctuation);
        }

        let mut morpheme_count = SEGMENT_TAG.find_iter(line).count();
        if line.starts_with("<CAP>") {
            if !self.truecase {
                return Err(ParseSkip::Capitalized);
            }
            morpheme_count = morpheme_count.saturating_sub(1);
        }

        let line = HYPHENATION.replace_all(line, "${1}<->-<#>");
        let lemma = LEMMA
            .captures(&line)
            .and_then(|c| c.get(1))
            .map(|m| ANNOTATION.replace_all(m.as_str(), "").into_owned())
            .ok_or(ParseSkip::NoLemma)?;

        if !self.splittable_classes.iter().any(|c| c == class) {
            return Err(ParseSkip::ClassNotSplittable(class.to_string()));
        }
        if !lemma.contains(COMPOUND_BOUNDARY) {
            return Err(ParseSkip::NoCompoundBoundary);
        }
        if lemma.contains(DERIVATION_BOUNDARY) {
            return Err(ParseSkip::Unsplittable);
        }

        let mut elements: Vec<String> = lemma.split(COMPOUND_BOUNDARY).map(str::to_string).collect();
        let stem = strip_boundaries(&elements[..elements.len() - 1].concat());
        if let Some(ending) = realized_ending(word, &stem) {
            if let Some(last) = elements.last_mut() {
                *last = ending.to_string();
            }
        }
        if let Some(last) = elements.last_mut() {
            *last = strip_boundaries(last);
        }

        let morphemes = elements.iter().map(|e| split_juncture(e)).collect();
        let split = MorphemeSplit::new(morphemes);
        debug!(word, class, morpheme_count, %split, "analysis accepted");
        Ok(split)
    }
}

fn strip_boundaries(s: &str) -> String {
    BOUNDARY.replace_all(s, "").into_owned()
}

/// The surface text following the first occurrence of `stem` in `wordform`,
/// cut at a second occurrence if there is one.
fn realized_ending<'a>(wordform: &'a str, stem: &str) -> Option<&'a str> {
    if stem.is_empty() {
        return None;
    }
    let start = wordform.find(stem)? + stem.len();
    let rest = &wordform[start..];
    Some(match rest.find(stem) {
        Some(end) => &rest[..end],
        None => rest,
    })
}

/// `Arbeit<->s` → (Arbeit, s); with several linking tags the last one wins
/// and the rest stays in the root.
fn split_juncture(element: &str) -> Morpheme {
    let parts: Vec<&str> = element.split(JUNCTURE_BOUNDARY).collect();
    let (root, juncture) = match parts.as_slice() {
        [root, juncture] => (root.to_string(), juncture.to_string()),
        [init @ .., juncture] if !init.is_empty() => (init.concat(), juncture.to_string()),
        _ => (element.to_string(), String::new()),
    };
    Morpheme::new(strip_boundaries(&root), juncture)
}
