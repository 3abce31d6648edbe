#![deny(missing_docs)]

//! Core library for the wikishard dump extractor.

/// Environment-driven configuration management.
pub mod config;
/// Streaming dump extraction pipeline.
pub mod extract;
/// Structured logging and tracing setup.
pub mod logging;
