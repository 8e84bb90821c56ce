use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::process;

use compound_engine::api::train_model;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Open `corpus`, or stdin when absent.
pub fn open_input(corpus: Option<&str>) -> Box<dyn BufRead> {
    match corpus {
        Some(path) => {
            let file = die!(File::open(path), "Error opening {path}: {}");
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    }
}

pub fn train_cmd(model: &str, corpus: Option<&str>, syntax: bool, quiet: bool) {
    let input = open_input(corpus);
    let words = die!(
        train_model(input, Path::new(model), syntax),
        "Error training model: {}"
    );
    if !quiet {
        eprintln!("Wrote {words} words to {model}");
    }
}
