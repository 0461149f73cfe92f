//! # Command-Line Interface Module
//!
//! Implementations behind the CLI surface. Each function maps parsed clap
//! options onto the pipeline, wires up the Spotify catalog client, and
//! turns fatal errors into the process exit path.
//!
//! ## Dependencies
//!
//! This module depends on several core application components:
//! - [`crate::catalog`] - Catalog capability and the Spotify client
//! - [`crate::pipeline`] - Resolution, reconciliation, and reporting
//! - [`crate::config`] - Environment-driven configuration
//! - [`crate::types`] - Data structures and type definitions

mod generate;

pub use generate::generate;
