use std::io;

use crate::analyzer::AnalyzerError;
use crate::freq::ModelError;
use crate::settings::SettingsError;

/// Failures that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("model error: {0}")]
    Model(#[from] ModelError),
    #[error("analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
