// src/config/mod.rs
//! Configuration system for script-vault
//!
//! TOML file + built-in defaults. Every section and field is optional.

pub use app::{load, load_from, Config, InterpreterSettings, KeySettings, TemplateSettings};

mod app;
mod defaults;
