//! Configuration module for Bookshelf
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a file targets tululu.org.
//!
//! # Example
//!
//! ```no_run
//! use bookshelf::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("bookshelf.toml")).unwrap();
//! println!("Archiving into: {:?}", config.output.destination);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, HttpConfig, OutputConfig, SelectorConfig, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
