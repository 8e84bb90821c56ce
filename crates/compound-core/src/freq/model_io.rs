use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::{Map, Value};

/// The payload starts at the first `{` within this many bytes.
const HEADER_SCAN_LIMIT: usize = 100;

const MODEL_HEADER: &str = "# -*- coding: utf-8 -*-\n\nmodel = ";

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no JSON payload near the start of the model file")]
    MissingPayload,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("count for {word:?} is not a non-negative integer")]
    InvalidCount { word: String },
}

/// Read a frequency model file, keeping the counts in file order.
pub fn load_model(path: &Path) -> Result<Vec<(String, u64)>, ModelError> {
    let content = fs::read_to_string(path)?;
    parse_model(&content)
}

pub fn parse_model(content: &str) -> Result<Vec<(String, u64)>, ModelError> {
    let scan = &content.as_bytes()[..content.len().min(HEADER_SCAN_LIMIT)];
    let offset = scan
        .iter()
        .position(|&b| b == b'{')
        .ok_or(ModelError::MissingPayload)?;

    let map: Map<String, Value> = serde_json::from_str(&content[offset..])?;
    map.into_iter()
        .map(|(word, value)| match value.as_u64() {
            Some(count) => Ok((word, count)),
            None => Err(ModelError::InvalidCount { word }),
        })
        .collect()
}

/// Write counts as a model file: a short header, then a JSON object.
pub fn write_model<W: Write>(
    writer: &mut W,
    counts: impl IntoIterator<Item = (String, u64)>,
) -> Result<(), ModelError> {
    let map: Map<String, Value> = counts
        .into_iter()
        .map(|(word, count)| (word, Value::from(count)))
        .collect();
    writer.write_all(MODEL_HEADER.as_bytes())?;
    serde_json::to_writer_pretty(&mut *writer, &map)?;
    writer.write_all(b"\n")?;
    Ok(())
}
