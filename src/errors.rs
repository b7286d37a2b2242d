//! Error types for the nullable adapters
//!
//! This module contains the two failures a conversion can report: a JSON
//! document that is not a valid literal for the target type, and a database
//! value the target type does not accept.

use thiserror::Error;

/// JSON bytes are neither `null` nor a canonical literal of the target type
#[derive(Error, Debug)]
#[error("JSON decode error: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

impl DecodeError {
    /// Underlying parser error
    pub fn inner(&self) -> &serde_json::Error {
        &self.0
    }

    pub fn into_inner(self) -> serde_json::Error {
        self.0
    }

    /// 1-based line of the offending input
    pub fn line(&self) -> usize {
        self.0.line()
    }

    /// 1-based column of the offending input
    pub fn column(&self) -> usize {
        self.0.column()
    }
}

/// Database value is neither SQL NULL nor convertible to the target type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Unsupported scan source: cannot convert {source_type} into {target}")]
    UnsupportedType {
        source_type: &'static str,
        target: &'static str,
    },

    #[error("Value out of range: {value} does not fit into {target}")]
    OutOfRange { value: String, target: &'static str },
}
