//! Line-level compound splitting over a loaded model.
//!
//! `CompoundSplitter` owns the frequency table, the settings and (in hybrid
//! mode) the analyzer with its cache, and turns corpus lines into split
//! lines. `train_model` builds the model file it reads.

mod error;

pub use error::EngineError;

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use tracing::{debug, debug_span};

use crate::analyzer::{Analyzer, AnalyzerOptions, ProcessAnalyzer};
use crate::freq::{load_model, write_model, CorpusCounts, FrequencyTable};
use crate::morph::AnalysisContext;
use crate::render::{render_flat, render_tree};
use crate::settings::SplitterConfig;
use crate::splitter::{ScoredCandidate, Source, SplitOutcome, Splitter};
use crate::syntax::{is_tree_line, tokenize_tree_line, Token};

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitStats {
    pub lines: usize,
    pub words: usize,
    pub frequent: usize,
    pub split: usize,
}

pub struct CompoundSplitter {
    table: FrequencyTable,
    config: SplitterConfig,
    analysis: Option<AnalysisContext<Box<dyn Analyzer>>>,
    stats: SplitStats,
}

impl CompoundSplitter {
    /// Corpus-only splitter.
    pub fn new(table: FrequencyTable, config: SplitterConfig) -> Self {
        Self {
            table,
            config,
            analysis: None,
            stats: SplitStats::default(),
        }
    }

    /// Take candidates from `analyzer` instead of the corpus lattice.
    pub fn with_analyzer(mut self, analyzer: Box<dyn Analyzer>) -> Self {
        self.analysis = Some(AnalysisContext::new(analyzer, &self.config));
        self
    }

    /// Load a model file and, with `analyzer_model`, start the analyzer on it.
    pub fn open(
        model: &Path,
        config: SplitterConfig,
        analyzer_model: Option<&Path>,
    ) -> Result<Self, EngineError> {
        let entries = load_model(model)?;
        let table = FrequencyTable::from_counts(entries, config.split.truecase);
        debug!(entries = table.len(), "model loaded");
        let splitter = Self::new(table, config);
        match analyzer_model {
            Some(analyzer_model) => {
                let options = AnalyzerOptions::from(&splitter.config.analyzer);
                let analyzer =
                    ProcessAnalyzer::start(&splitter.config.analyzer.binary, analyzer_model, &options)?;
                Ok(splitter.with_analyzer(Box::new(analyzer)))
            }
            None => Ok(splitter),
        }
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn stats(&self) -> SplitStats {
        self.stats
    }

    pub fn is_hybrid(&self) -> bool {
        self.analysis.is_some()
    }

    /// Decide how to split one word.
    pub fn split_word(&mut self, word: &str) -> SplitOutcome {
        let splitter = Splitter::new(&self.table, &self.config.split);
        self.stats.words += 1;
        if splitter.is_frequent(word) {
            debug!(word, "frequent word, skipping");
            self.stats.frequent += 1;
            return SplitOutcome::Frequent;
        }
        let outcome = match self.analysis.as_mut() {
            Some(ctx) => splitter.split(word, Source::Morphology(ctx.splits(word))),
            None => splitter.split(word, Source::Corpus),
        };
        if matches!(outcome, SplitOutcome::Split { .. }) {
            self.stats.split += 1;
        }
        outcome
    }

    /// Every candidate considered for `word`, with its score.
    pub fn scored_candidates(&mut self, word: &str) -> Vec<ScoredCandidate> {
        let splitter = Splitter::new(&self.table, &self.config.split);
        match self.analysis.as_mut() {
            Some(ctx) => splitter.scored_candidates(word, Source::Morphology(ctx.splits(word))),
            None => splitter.scored_candidates(word, Source::Corpus),
        }
    }

    /// Split every word of a line (without its line terminator).
    ///
    /// With `syntax`, lines carrying tree markup keep their markup and
    /// spacing and split words become tree fragments; other lines are
    /// re-joined with single spaces.
    pub fn process_line(&mut self, line: &str, syntax: bool) -> String {
        self.stats.lines += 1;
        if syntax && is_tree_line(line) {
            self.process_tree_line(line)
        } else {
            let mode = self.config.output.junctures;
            let mut words = Vec::new();
            for word in line.split_whitespace() {
                let outcome = self.split_word(word);
                words.push(render_flat(word, &outcome, mode));
            }
            words.join(" ")
        }
    }

    fn process_tree_line(&mut self, line: &str) -> String {
        let mode = self.config.output.junctures;
        let dependency = self.config.output.dependency;
        let mut out: Vec<String> = Vec::new();
        for token in tokenize_tree_line(line) {
            let word = match token {
                Token::Markup(markup) => {
                    out.push(markup.to_string());
                    continue;
                }
                Token::Text(word) => word,
            };
            let outcome = self.split_word(word);
            let rendered = match outcome.decomposition() {
                Some(d) if d.segment_count() > 1 => {
                    let mut tree = render_tree(d, mode, dependency);
                    if dependency {
                        // The last SEGMENT leaf takes over the word's
                        // preterminal: drop the opening tag before the word
                        // and leave the leaf open for the closing tag after it.
                        if let Some(previous) = out.last_mut() {
                            strip_last_tag(previous);
                        }
                        strip_last_tag(&mut tree);
                    }
                    tree
                }
                _ => render_flat(word, &outcome, mode),
            };
            out.push(rendered);
        }
        out.concat()
    }

    /// Split a whole stream line by line.
    pub fn process_stream<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
        syntax: bool,
    ) -> Result<SplitStats, EngineError> {
        let _span = debug_span!("process_stream", syntax).entered();
        for line in input.lines() {
            let line = line?;
            let split = self.process_line(&line, syntax);
            writeln!(output, "{split}")?;
        }
        output.flush()?;
        debug!(stats = ?self.stats, "stream done");
        Ok(self.stats)
    }

    /// Stop the analyzer, if any.
    pub fn close(&mut self) {
        if let Some(ctx) = self.analysis.as_mut() {
            ctx.close();
        }
    }
}

fn strip_last_tag(s: &mut String) {
    if let Some(pos) = s.rfind('<') {
        s.truncate(pos);
    }
}

/// Count the words of a corpus and write them as a model file.
///
/// Returns the number of distinct words.
pub fn train_model<R: BufRead>(input: R, model: &Path, syntax: bool) -> Result<usize, EngineError> {
    let counts = CorpusCounts::from_reader(input, syntax)?;
    let distinct = counts.len();
    let mut writer = BufWriter::new(File::create(model)?);
    write_model(&mut writer, counts.into_entries())?;
    writer.flush()?;
    Ok(distinct)
}
