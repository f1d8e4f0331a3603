//! # snackgen
//!
//! Library half of the snackgen binary: configuration loading and output
//! rendering. Kept separate from `main.rs` so integration tests can reach it.

pub mod config;
pub mod render;

pub use config::AppConfig;
