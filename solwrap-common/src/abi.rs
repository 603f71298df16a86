//! The contract interface model: an ordered list of ABI entries.

use crate::errors::ParseParamTypeError;
use crate::hash;
use crate::param_type::ParamType;
use serde::{Deserialize, Serialize};

/// The kind of an ABI entry.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// The contract constructor.
    Constructor,
    /// A callable contract function.
    Function,
    /// An event emitted by the contract.
    Event,
    /// The fallback function.
    Fallback,
    /// The plain ether receive function.
    Receive,
    /// A custom error.
    Error,
}

/// The declared effect class of a function.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    /// Neither reads nor writes contract state.
    Pure,
    /// Reads but does not write contract state.
    View,
    /// Writes contract state, rejects value transfers.
    NonPayable,
    /// Writes contract state and accepts value transfers.
    Payable,
}

impl StateMutability {
    /// Returns `true` for `pure` and `view` functions, the ones that can only
    /// be called and never need a transaction.
    pub fn is_read_only(self) -> bool {
        matches!(self, StateMutability::Pure | StateMutability::View)
    }
}

impl Default for StateMutability {
    fn default() -> Self {
        StateMutability::NonPayable
    }
}

/// A single input, output or event parameter.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AbiParameter {
    /// The parameter name, empty for unnamed parameters.
    #[serde(default)]
    pub name: String,
    /// The raw type string, for example `uint256` or `tuple[]`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Tuple components, only present for tuple types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AbiParameter>,
    /// Whether this event parameter is stored in a log topic.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub indexed: bool,
}

impl AbiParameter {
    /// Parses the raw type of this parameter.
    pub fn param_type(&self) -> Result<ParamType, ParseParamTypeError> {
        ParamType::parse(&self.kind, &self.components)
    }
}

/// One parsed member of a contract interface.
///
/// Entries are produced by the [`AbiLoader`](crate::loader::AbiLoader) which
/// guarantees that functions, events and errors are named.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AbiEntry {
    /// The entry kind.
    pub kind: EntryKind,
    /// The entry name, `None` for constructors, fallback and receive entries.
    pub name: Option<String>,
    /// Ordered input parameters.
    pub inputs: Vec<AbiParameter>,
    /// Ordered output parameters, only populated for functions.
    pub outputs: Vec<AbiParameter>,
    /// The state mutability tag.
    pub state_mutability: StateMutability,
    /// Whether an event is anonymous.
    pub anonymous: bool,
}

impl AbiEntry {
    /// The entry name, or an empty string for unnamed entries.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Parses the types of all inputs in order.
    pub fn input_types(&self) -> Result<Vec<ParamType>, ParseParamTypeError> {
        self.inputs.iter().map(AbiParameter::param_type).collect()
    }

    /// Computes the canonical signature, for example `transfer(address,uint256)`.
    pub fn abi_signature(&self) -> Result<String, ParseParamTypeError> {
        let types = self
            .input_types()?
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Ok(format!("{}({})", self.name(), types))
    }

    /// Computes the 4 byte selector of a function.
    pub fn selector(&self) -> Result<[u8; 4], ParseParamTypeError> {
        Ok(hash::function_selector(self.abi_signature()?))
    }

    /// Computes the `0x` prefixed hex selector of a function.
    pub fn selector_hex(&self) -> Result<String, ParseParamTypeError> {
        Ok(format!("0x{}", hex::encode(self.selector()?)))
    }

    /// Computes the topic of a non-anonymous event.
    pub fn topic(&self) -> Result<[u8; 32], ParseParamTypeError> {
        Ok(hash::event_topic(self.abi_signature()?))
    }
}

/// A loaded contract interface, its entries in document order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Abi {
    entries: Vec<AbiEntry>,
}

impl Abi {
    /// Creates an interface from already validated entries.
    pub fn new(entries: Vec<AbiEntry>) -> Self {
        Abi { entries }
    }

    /// All entries in document order.
    pub fn entries(&self) -> &[AbiEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the interface has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The constructor entry, if declared.
    pub fn constructor(&self) -> Option<&AbiEntry> {
        self.of_kind(EntryKind::Constructor).next()
    }

    /// Function entries in document order.
    pub fn functions(&self) -> impl Iterator<Item = &AbiEntry> + '_ {
        self.of_kind(EntryKind::Function)
    }

    /// Event entries in document order.
    pub fn events(&self) -> impl Iterator<Item = &AbiEntry> + '_ {
        self.of_kind(EntryKind::Event)
    }

    fn of_kind(&self, kind: EntryKind) -> impl Iterator<Item = &AbiEntry> + '_ {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }
}
