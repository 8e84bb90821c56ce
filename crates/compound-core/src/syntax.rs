//! Tokenizer for Moses-XML tree lines (`<tree label="NN"> Haustür </tree>`).
//!
//! A line is cut into markup runs (optional whitespace, one or more tags,
//! optional whitespace), whitespace separators, and the text tokens between
//! them. Concatenating all tokens reproduces the line.

use std::sync::LazyLock;

use regex::Regex;

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:<[^<>]*>)+\s*|\s+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A word that may be split.
    Text(&'a str),
    /// Tags and/or whitespace, copied through verbatim.
    Markup(&'a str),
}

impl<'a> Token<'a> {
    pub fn as_str(&self) -> &'a str {
        match *self {
            Token::Text(s) | Token::Markup(s) => s,
        }
    }
}

/// Only lines that carry markup are treated as trees.
pub fn is_tree_line(line: &str) -> bool {
    line.contains('<')
}

pub fn tokenize_tree_line(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for m in SEPARATOR.find_iter(line) {
        if m.start() > last {
            tokens.push(Token::Text(&line[last..m.start()]));
        }
        tokens.push(Token::Markup(m.as_str()));
        last = m.end();
    }
    if last < line.len() {
        tokens.push(Token::Text(&line[last..]));
    }
    tokens
}

/// Words of a corpus line: text tokens of tree lines in syntax mode,
/// whitespace-separated tokens otherwise.
pub fn line_words(line: &str, syntax: bool) -> Vec<&str> {
    if syntax && is_tree_line(line) {
        tokenize_tree_line(line)
            .into_iter()
            .filter_map(|t| match t {
                Token::Text(s) => Some(s),
                Token::Markup(_) => None,
            })
            .collect()
    } else {
        line.split_whitespace().collect()
    }
}
