pub mod api;
pub mod trace_init;

pub use compound_core::{analyzer, freq, morph, render, settings, splitter, syntax};
