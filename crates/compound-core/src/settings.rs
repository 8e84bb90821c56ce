//! Splitter settings loaded from TOML.
//!
//! - `SplitterConfig::default()` parses the embedded `default_settings.toml`
//! - `parse_settings_toml(toml_content)` parses and validates a custom file
//! - the parsed value is passed explicitly to every component that needs it

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct SplitterConfig {
    pub split: SplitSettings,
    pub analyzer: AnalyzerSettings,
    pub output: OutputSettings,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SplitSettings {
    pub min_size: usize,
    pub min_count: u64,
    pub max_count: u64,
    pub max_hypotheses: usize,
    pub junctures: Vec<String>,
    pub fewest: bool,
    pub truecase: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerSettings {
    pub binary: String,
    pub prompt: String,
    pub startup_timeout_secs: u64,
    pub query_timeout_secs: u64,
    pub splittable_classes: Vec<String>,
    pub cache_capacity: usize,
}

impl AnalyzerSettings {
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    /// Cache bound, `None` when unbounded.
    pub fn cache_bound(&self) -> Option<usize> {
        (self.cache_capacity > 0).then_some(self.cache_capacity)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub junctures: JunctureMode,
    pub dependency: bool,
}

/// How linking elements between segments are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JunctureMode {
    #[default]
    Omit,
    /// `haus @s@ tür`
    Write,
    /// `hauss@@ tür`
    Merge,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<SplitterConfig, SettingsError> {
    let s: SplitterConfig =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

pub fn validate(s: &SplitterConfig) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(split.min_size);
    check_positive!(split.max_hypotheses);
    check_positive!(analyzer.startup_timeout_secs);
    check_positive!(analyzer.query_timeout_secs);

    if !s.split.junctures.iter().any(|j| j.is_empty()) {
        return Err(SettingsError::InvalidValue {
            field: "split.junctures".to_string(),
            reason: "must include the empty juncture".to_string(),
        });
    }
    if s.analyzer.prompt.is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "analyzer.prompt".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if s.analyzer.splittable_classes.is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "analyzer.splittable_classes".to_string(),
            reason: "must list at least one class".to_string(),
        });
    }

    Ok(())
}
