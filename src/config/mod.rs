//! Configuration module for Bedesten
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use bedesten::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Input directory: {}", config.input.directory);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, InputConfig, OutputConfig, SkipConfig};

// Re-export parser functions
pub use parser::{load_config, resolve_api_key};
