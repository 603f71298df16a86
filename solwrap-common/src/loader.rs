//! Loads and validates ABI documents.
//!
//! An ABI document is a JSON array of entries. Each entry is an object with
//! at least a `type` field; we parse the following fields:
//!
//! - `type`: one of `constructor`, `function`, `event`, `fallback`,
//!   `receive` or `error`;
//! - `name`: required for functions, events and errors;
//! - `inputs`, `outputs`: parameter lists (optional);
//! - `stateMutability`: `pure`, `view`, `nonpayable` or `payable`, falling
//!   back to the legacy `constant` and `payable` flags when absent;
//! - `anonymous`: for events (optional).
//!
//! Loading is all-or-nothing: either every entry validates or an error is
//! returned.

use crate::abi::{Abi, AbiEntry, AbiParameter, EntryKind, StateMutability};
use crate::errors::AbiError;
use serde::Deserialize;
use serde_json::{from_reader, from_slice, from_str};
use std::io::Read;

/// Loads ABI documents.
#[derive(Clone, Debug, Default)]
pub struct AbiLoader {
    /// Accept documents with no entries instead of failing with
    /// [`AbiError::Empty`].
    pub allow_empty: bool,
}

impl AbiLoader {
    /// Create a new loader.
    pub fn new() -> Self {
        AbiLoader::default()
    }

    /// Set whether empty documents are accepted. See [`allow_empty`] for more
    /// info.
    ///
    /// [`allow_empty`]: #structfield.allow_empty
    pub fn allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    /// Loads an ABI from a reader producing JSON text.
    pub fn load_from_reader(&self, v: impl Read) -> Result<Abi, AbiError> {
        self.load(from_reader(v)?)
    }

    /// Loads an ABI from bytes of JSON text.
    pub fn load_from_slice(&self, v: &[u8]) -> Result<Abi, AbiError> {
        self.load(from_slice(v)?)
    }

    /// Loads an ABI from a string of JSON text.
    pub fn load_from_str(&self, v: &str) -> Result<Abi, AbiError> {
        self.load(from_str(v)?)
    }

    fn load(&self, raw: Vec<RawEntry>) -> Result<Abi, AbiError> {
        if raw.is_empty() && !self.allow_empty {
            return Err(AbiError::Empty);
        }

        let mut has_constructor = false;
        let mut entries = Vec::with_capacity(raw.len());
        for (index, entry) in raw.into_iter().enumerate() {
            let invalid = |reason: &str| AbiError::InvalidEntry {
                index,
                reason: reason.to_string(),
            };

            let name = entry.name.filter(|name| !name.is_empty());
            match entry.kind {
                EntryKind::Function | EntryKind::Event | EntryKind::Error if name.is_none() => {
                    return Err(invalid("missing name"));
                }
                EntryKind::Constructor if has_constructor => {
                    return Err(invalid("duplicate constructor"));
                }
                EntryKind::Constructor => has_constructor = true,
                _ => {}
            }
            if entry.kind != EntryKind::Function && !entry.outputs.is_empty() {
                return Err(invalid("only functions may declare outputs"));
            }

            let state_mutability = entry.state_mutability.unwrap_or_else(|| {
                if entry.payable {
                    StateMutability::Payable
                } else if entry.constant {
                    StateMutability::View
                } else {
                    StateMutability::NonPayable
                }
            });

            let mut inputs = entry.inputs;
            if entry.kind == EntryKind::Event {
                let max_indexed = if entry.anonymous { 4 } else { 3 };
                if inputs.iter().filter(|input| input.indexed).count() > max_indexed {
                    return Err(invalid("too many indexed parameters"));
                }
            } else {
                for input in &mut inputs {
                    input.indexed = false;
                }
            }

            entries.push(AbiEntry {
                kind: entry.kind,
                name: match entry.kind {
                    EntryKind::Constructor | EntryKind::Fallback | EntryKind::Receive => None,
                    _ => name,
                },
                inputs,
                outputs: entry.outputs,
                state_mutability,
                anonymous: entry.kind == EntryKind::Event && entry.anonymous,
            });
        }

        Ok(Abi::new(entries))
    }
}

/// The serialized shape of an entry, before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    #[serde(rename = "type")]
    kind: EntryKind,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    inputs: Vec<AbiParameter>,
    #[serde(default)]
    outputs: Vec<AbiParameter>,
    #[serde(default)]
    state_mutability: Option<StateMutability>,
    #[serde(default)]
    constant: bool,
    #[serde(default)]
    payable: bool,
    #[serde(default)]
    anonymous: bool,
}
