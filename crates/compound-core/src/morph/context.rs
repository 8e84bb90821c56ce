use tracing::debug;

use super::{AnalysisCache, AnalysisParser, MorphemeSplit};
use crate::analyzer::Analyzer;
use crate::settings::SplitterConfig;

/// Analyzer, parser and memoized results for the hybrid path.
///
/// Each distinct wordform is sent to the analyzer at most once per run
/// (unless evicted from a bounded cache).
pub struct AnalysisContext<A: Analyzer> {
    analyzer: A,
    parser: AnalysisParser,
    cache: AnalysisCache,
}

impl<A: Analyzer> AnalysisContext<A> {
    pub fn new(analyzer: A, config: &SplitterConfig) -> Self {
        Self {
            analyzer,
            parser: AnalysisParser::new(
                config.analyzer.splittable_classes.clone(),
                config.split.truecase,
            ),
            cache: AnalysisCache::new(config.analyzer.cache_bound()),
        }
    }

    /// Cached splits of `word`, querying the analyzer on a miss.
    pub fn splits(&mut self, word: &str) -> &[MorphemeSplit] {
        if self.cache.contains(word) {
            return self.cache.get(word).unwrap_or(&[]);
        }
        let lines = self.analyzer.analyse(word);
        let analysed = self.parser.parse(word, &lines);
        debug!(word, lines = lines.len(), splits = analysed.len(), "analysed");
        self.cache.insert(word, analysed)
    }

    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    pub fn close(&mut self) {
        self.analyzer.close();
    }
}
