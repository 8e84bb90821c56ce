use std::io::{self, BufWriter};
use std::path::Path;
use std::process;

use compound_engine::api::CompoundSplitter;
use compound_engine::render::render_flat;
use compound_engine::settings::SplitterConfig;
use compound_engine::splitter::SplitOutcome;

use super::train_ops::open_input;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub struct ApplyOptions<'a> {
    pub model: &'a str,
    pub corpus: Option<&'a str>,
    /// Analyzer model; enables hybrid splitting.
    pub smor: Option<&'a str>,
    pub syntax: bool,
    pub quiet: bool,
}

fn open_splitter(model: &str, smor: Option<&str>, config: SplitterConfig) -> CompoundSplitter {
    die!(
        CompoundSplitter::open(Path::new(model), config, smor.map(Path::new)),
        "Error: {}"
    )
}

pub fn apply_cmd(opts: &ApplyOptions, config: SplitterConfig) {
    let mut splitter = open_splitter(opts.model, opts.smor, config);
    let input = open_input(opts.corpus);
    let output = BufWriter::new(io::stdout().lock());
    let stats = die!(
        splitter.process_stream(input, output, opts.syntax),
        "Error: {}"
    );
    splitter.close();
    if !opts.quiet {
        eprintln!(
            "{} lines, {} words: {} split, {} frequent",
            stats.lines, stats.words, stats.split, stats.frequent
        );
    }
}

/// Print every scored candidate and the decision for each word.
pub fn split_cmd(model: &str, smor: Option<&str>, config: SplitterConfig, words: &[String]) {
    let mut splitter = open_splitter(model, smor, config);
    let mode = splitter.config().output.junctures;
    for word in words {
        println!("{word}");
        let outcome = splitter.split_word(word);
        if outcome == SplitOutcome::Frequent {
            println!("  frequent, not split");
            continue;
        }
        for (i, candidate) in splitter.scored_candidates(word).iter().enumerate() {
            println!(
                "  #{:>2}: {}  score {}",
                i + 1,
                candidate.decomposition,
                candidate.score
            );
        }
        println!("  => {}", render_flat(word, &outcome, mode));
    }
    splitter.close();
}
