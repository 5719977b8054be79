//! Error types for Canvasflow.
//!
//! All errors are represented by the `CanvasflowError` enum, which provides
//! specific variants for different error categories.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Canvasflow operations.
///
/// Each variant represents a specific category of error that can occur
/// during conversion, identity reconciliation, or storage operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum CanvasflowError {
    /// Forest-shape violations: dangling edge, duplicate parent, cycle remnant.
    #[error("{0}")]
    Structure(String),

    /// Lookup of an id absent from the canvas or store.
    #[error("{0}")]
    NotFound(String),

    /// Data conversion errors (JSON).
    #[error("{0}")]
    Convert(String),

    /// Workflow definition errors.
    #[error("{0}")]
    Workflow(String),

    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Storage operation errors.
    #[error("{0}")]
    Store(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<CanvasflowError> for String {
    fn from(val: CanvasflowError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for CanvasflowError {
    fn from(error: std::io::Error) -> Self {
        CanvasflowError::IoError(error.to_string())
    }
}

impl From<CanvasflowError> for std::io::Error {
    fn from(val: CanvasflowError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<serde_json::Error> for CanvasflowError {
    fn from(error: serde_json::Error) -> Self {
        CanvasflowError::Convert(error.to_string())
    }
}
