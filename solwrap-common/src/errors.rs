//! Module with common error types.

use serde_json::Error as JsonError;
use std::io::Error as IoError;
use thiserror::Error;

/// An error in loading or validating an ABI document.
#[derive(Debug, Error)]
pub enum AbiError {
    /// An IO error occurred while reading the ABI document.
    #[error("failed to read ABI document: {0}")]
    Io(#[from] IoError),

    /// The document is not a JSON list of ABI entries.
    #[error("failed to parse ABI JSON: {0}")]
    Json(#[from] JsonError),

    /// The document parsed but one of its entries violates the ABI schema.
    #[error("entry {index} is invalid: {reason}")]
    InvalidEntry {
        /// Position of the offending entry in the document.
        index: usize,
        /// Human readable explanation.
        reason: String,
    },

    /// The document is a well formed but empty list.
    #[error("ABI contains no entries")]
    Empty,
}

impl AbiError {
    /// Returns `true` if this error signals a schema-valid but empty ABI,
    /// as opposed to a malformed document.
    pub fn is_empty(&self) -> bool {
        matches!(self, AbiError::Empty)
    }
}

/// An error representing an error parsing a parameter type.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("'{0}' is not a valid Solidity type")]
pub struct ParseParamTypeError(pub String);
