//! Errors raised while generating contract bindings.

use solwrap_common::errors::AbiError;
use std::io::Error as IoError;
use thiserror::Error;

/// A fatal error while generating the bindings of a single contract.
///
/// There is no partial or best-effort generation: any of these aborts the
/// whole run for the contract.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The ABI document is not a valid list of entries.
    #[error("malformed ABI: {0}")]
    MalformedAbi(#[source] AbiError),

    /// The ABI document is a valid but empty list.
    #[error("unable to parse input ABI: it contains no entries")]
    EmptyAbi,

    /// A parameter type is not part of the supported type grammar.
    #[error("unsupported type '{kind}' in {location}")]
    UnsupportedType {
        /// The raw type string.
        kind: String,
        /// Where the type was found, for example `function transfer`.
        location: String,
    },

    /// Two members would be emitted with the same identifier.
    #[error("identifier '{identifier}' is emitted for both {first} and {second}")]
    UnresolvableCollision {
        /// The colliding identifier.
        identifier: String,
        /// Signature of the first member using the identifier.
        first: String,
        /// Signature of the second member using the identifier.
        second: String,
    },

    /// Reading an input or writing the generated source failed.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// The generator was configured with invalid settings.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<AbiError> for GenerateError {
    fn from(err: AbiError) -> Self {
        match err {
            AbiError::Empty => GenerateError::EmptyAbi,
            AbiError::Io(err) => GenerateError::Io(err),
            err => GenerateError::MalformedAbi(err),
        }
    }
}

/// A generation failure for a named contract, as reported to the operator.
#[derive(Debug, Error)]
#[error("failed to generate contract {contract}: {source}")]
pub struct GenerationFailure {
    /// The contract whose generation failed.
    pub contract: String,
    /// The cause.
    #[source]
    pub source: GenerateError,
}

impl GenerationFailure {
    /// Wraps an error with the name of the contract it occurred for.
    pub fn new(contract: impl Into<String>, source: GenerateError) -> Self {
        GenerationFailure {
            contract: contract.into(),
            source,
        }
    }
}
