//! Morphological analyzer access.
//!
//! `Analyzer` is the seam between the splitter and the external finite-state
//! analyzer. `ProcessAnalyzer` talks to a real interactive analyzer process;
//! `ScriptedAnalyzer` replays canned answers for tests.

mod process;
mod scripted;

pub use process::{AnalyzerOptions, ProcessAnalyzer};
pub use scripted::{QueryLog, ScriptedAnalyzer};

use std::io;
use std::time::Duration;

use tracing::warn;

/// Inputs the analyzer treats as commands rather than words.
const CONTROL_TOKENS: &[&str] = &["q", "\x7f"];

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("failed to spawn analyzer {binary:?}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: io::Error,
    },

    #[error("analyzer exited before its prompt appeared: {output}")]
    Startup { output: String },

    #[error("analyzer prompt did not appear within {timeout:?}: {output}")]
    StartupTimeout { timeout: Duration, output: String },

    #[error("no analyzer response within {0:?}")]
    Timeout(Duration),

    #[error("analyzer output stream closed")]
    Closed,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl AnalyzerError {
    /// Only failures to bring the analyzer up abort a run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AnalyzerError::Spawn { .. }
                | AnalyzerError::Startup { .. }
                | AnalyzerError::StartupTimeout { .. }
        )
    }
}

pub trait Analyzer {
    /// Send one (trimmed, non-empty) word and return the raw analysis lines.
    fn query(&mut self, word: &str) -> Result<Vec<String>, AnalyzerError>;

    /// Analyse a word, degrading every per-word failure to "no analyses".
    fn analyse(&mut self, word: &str) -> Vec<String> {
        let word = word.trim();
        if word.is_empty() || CONTROL_TOKENS.contains(&word) {
            return Vec::new();
        }
        match self.query(word) {
            Ok(lines) => lines,
            Err(e) => {
                warn!(word, error = %e, "analyzer query failed; word left unanalysed");
                Vec::new()
            }
        }
    }

    /// Shut the analyzer down. Further queries fail with `Closed`.
    fn close(&mut self) {}
}

impl<A: Analyzer + ?Sized> Analyzer for Box<A> {
    fn query(&mut self, word: &str) -> Result<Vec<String>, AnalyzerError> {
        (**self).query(word)
    }

    fn analyse(&mut self, word: &str) -> Vec<String> {
        (**self).analyse(word)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Cut the text printed between two prompts into analysis lines.
///
/// Drops the echoed request (if the analyzer echoes input) and the empty
/// framing line before the prompt; a lone "no result" line means no analyses.
pub(crate) fn frame_response(raw: &str, word: &str) -> Vec<String> {
    let mut lines: Vec<&str> = raw
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    if lines.first().is_some_and(|l| l.trim() == word) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    if lines.len() == 1 && lines[0].starts_with("no result for ") {
        return Vec::new();
    }
    lines.into_iter().map(str::to_string).collect()
}
