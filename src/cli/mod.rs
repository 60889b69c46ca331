//! CLI command handlers

pub mod commands;

pub use commands::{audit, generate, init_config, load_config, verify, GenerateOptions};
