#![deny(missing_docs)]

//! Core library for the Rusty Summary server.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// PDF text extraction.
pub mod extract;
/// Structured logging and tracing setup.
pub mod logging;
/// Summarization counters.
pub mod metrics;
/// Summarization model abstraction and adapters.
pub mod model;
/// Request pipeline: validation, extraction, summarization.
pub mod service;
/// Chunking summarizer.
pub mod summarizer;
