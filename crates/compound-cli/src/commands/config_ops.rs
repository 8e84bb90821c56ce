use std::fs;
use std::process;

use compound_engine::settings::{self, SplitterConfig};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let s = load_config(Some(file));
    println!(
        "OK: split.min_size={}, split.min_count={}, split.max_count={}, output.junctures={:?}",
        s.split.min_size, s.split.min_count, s.split.max_count, s.output.junctures
    );
}

/// Settings from `file`, or the embedded defaults.
pub fn load_config(file: Option<&str>) -> SplitterConfig {
    match file {
        Some(file) => {
            let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
            die!(settings::parse_settings_toml(&content), "Error: {}")
        }
        None => SplitterConfig::default(),
    }
}
