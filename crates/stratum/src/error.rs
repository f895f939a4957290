//! Error types for Stratum operations.
//!
//! This module provides the main error type [`StratumError`] which wraps
//! the error conditions that can occur while loading, laying out and
//! exporting a graph.

use std::io;

use thiserror::Error;

use crate::layout::LayoutError;

/// The main error type for Stratum operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the JSON error, so
/// callers can point at the offending line and column.
#[derive(Debug, Error)]
pub enum StratumError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: serde_json::Error, src: String },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for StratumError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl StratumError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
