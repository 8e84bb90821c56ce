pub mod analyzer;
pub mod freq;
pub mod morph;
pub mod render;
pub mod settings;
pub mod splitter;
pub mod syntax;
