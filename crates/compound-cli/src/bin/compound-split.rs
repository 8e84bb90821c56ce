use clap::{Args, Parser, Subcommand};

use compound_cli::commands::apply_ops::{self, ApplyOptions};
use compound_cli::commands::{config_ops, train_ops};
use compound_engine::settings::{JunctureMode, SplitterConfig};
use compound_engine::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "compound-split", about = "Hybrid compound splitter")]
struct Cli {
    /// Log candidate scores and skipped words to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split the words of a corpus (stdin by default) and write it to stdout
    Apply {
        #[command(flatten)]
        source: ModelArgs,
        /// Input corpus
        #[arg(long)]
        corpus: Option<String>,
        /// Input is in Moses XML tree format
        #[arg(long)]
        syntax: bool,
        #[command(flatten)]
        split: SplitArgs,
    },
    /// Count the words of a corpus and write a model
    Train {
        /// Model file to write
        #[arg(long)]
        model: String,
        /// Input corpus (stdin by default)
        #[arg(long)]
        corpus: Option<String>,
        /// Input is in Moses XML tree format
        #[arg(long)]
        syntax: bool,
    },
    /// Show every scored candidate for some words
    Split {
        #[command(flatten)]
        source: ModelArgs,
        #[command(flatten)]
        split: SplitArgs,
        /// Words to split
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

#[derive(Args)]
struct ModelArgs {
    /// Frequency model file
    #[arg(long)]
    model: String,
    /// Analyzer model; enables hybrid splitting
    #[arg(long)]
    smor: Option<String>,
}

#[derive(Args)]
struct SplitArgs {
    /// Settings TOML file (defaults are built in)
    #[arg(long)]
    config: Option<String>,
    /// Write junctures as @s@ tokens
    #[arg(long, conflicts_with = "merge_filler")]
    write_filler: bool,
    /// Merge junctures into the preceding segment (s@@)
    #[arg(long)]
    merge_filler: bool,
    /// Emit segments as they appear in the word
    #[arg(long)]
    no_truecase: bool,
    /// Prefer splits with the fewest segments
    #[arg(long)]
    fewest: bool,
    /// Dependency-style tree fragments (with --syntax)
    #[arg(long)]
    dependency: bool,
    /// Minimum segment length
    #[arg(long)]
    min_size: Option<usize>,
    /// Minimum segment count
    #[arg(long)]
    min_count: Option<u64>,
    /// Words at least this frequent are not split
    #[arg(long)]
    max_count: Option<u64>,
}

impl SplitArgs {
    /// Settings file (or defaults) with command-line overrides applied.
    fn resolve(&self) -> SplitterConfig {
        let mut config = config_ops::load_config(self.config.as_deref());
        if self.write_filler {
            config.output.junctures = JunctureMode::Write;
        }
        if self.merge_filler {
            config.output.junctures = JunctureMode::Merge;
        }
        if self.no_truecase {
            config.split.truecase = false;
        }
        if self.fewest {
            config.split.fewest = true;
        }
        if self.dependency {
            config.output.dependency = true;
        }
        if let Some(n) = self.min_size {
            config.split.min_size = n;
        }
        if let Some(n) = self.min_count {
            config.split.min_count = n;
        }
        if let Some(n) = self.max_count {
            config.split.max_count = n;
        }
        if let Err(e) = compound_engine::settings::validate(&config) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        config
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Apply {
            source,
            corpus,
            syntax,
            split,
        } => {
            let opts = ApplyOptions {
                model: &source.model,
                corpus: corpus.as_deref(),
                smor: source.smor.as_deref(),
                syntax,
                quiet: cli.quiet,
            };
            apply_ops::apply_cmd(&opts, split.resolve());
        }
        Command::Train {
            model,
            corpus,
            syntax,
        } => train_ops::train_cmd(&model, corpus.as_deref(), syntax, cli.quiet),
        Command::Split {
            source,
            split,
            words,
        } => apply_ops::split_cmd(&source.model, source.smor.as_deref(), split.resolve(), &words),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
