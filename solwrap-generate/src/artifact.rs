//! The in-memory result of a generation run.

use crate::generate::types::{TypeDescriptor, TypePolicy};
use crate::rustfmt;
use crate::util;
use proc_macro2::TokenStream;
use solwrap_common::StateMutability;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// What an emitted member does.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MemberKind {
    /// The deploy operation. When no binary was provided it is still emitted
    /// and fails when invoked.
    Deploy {
        /// Whether bytecode was embedded.
        binary_provided: bool,
    },
    /// A contract function.
    Function {
        /// The declared state mutability.
        mutability: StateMutability,
        /// Whether the submit (transaction) form is emitted.
        submit: bool,
        /// Whether the read-only simulation form is emitted.
        simulate: bool,
    },
    /// An event data type with its filter builder.
    Event {
        /// Whether the event is anonymous.
        anonymous: bool,
        /// Names of the indexed fields, in topic order.
        indexed: Vec<String>,
    },
}

/// A single emitted member of a contract wrapper.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Member {
    /// The identifier the member is emitted under.
    pub identifier: String,
    /// The canonical signature; `None` for the deploy operation.
    pub signature: Option<String>,
    /// What the member does.
    pub kind: MemberKind,
    /// Named input types, in declaration order.
    pub inputs: Vec<(String, TypeDescriptor)>,
    /// Output types, only populated for functions.
    pub outputs: Vec<TypeDescriptor>,
}

impl Member {
    /// The identifier qualified with the namespace it is emitted in. Functions
    /// and events never share a namespace.
    pub fn qualified_identifier(&self) -> String {
        match &self.kind {
            MemberKind::Deploy { .. } => format!("Contract::{}", self.identifier),
            MemberKind::Function { .. } => format!("Methods::{}", self.identifier),
            MemberKind::Event { .. } => format!("events::{}", self.identifier),
        }
    }
}

/// Type-safe contract bindings for one contract. The artifact is built once
/// by the generator and can be either written out as source or converted into
/// a token stream.
#[derive(Clone, Debug)]
pub struct ContractArtifact {
    pub(crate) namespace: String,
    pub(crate) contract_name: String,
    pub(crate) module_name: String,
    pub(crate) bytecode: Option<String>,
    pub(crate) policy: TypePolicy,
    pub(crate) members: Vec<Member>,
    pub(crate) tokens: TokenStream,
    pub(crate) rustfmt: bool,
}

impl ContractArtifact {
    /// The namespace the artifact is generated for.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The contract name, also the name of the re-exported contract type.
    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    /// The name of the generated module.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// The embedded bytecode, `None` if it was not provided.
    pub fn bytecode(&self) -> Option<&str> {
        self.bytecode.as_deref()
    }

    /// The integer mapping policy used.
    pub fn policy(&self) -> TypePolicy {
        self.policy
    }

    /// The emitted members: the deploy operation, then functions and events
    /// in ABI order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// The token stream of the generated module.
    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// Converts the artifact into its token stream.
    pub fn into_tokens(self) -> TokenStream {
        self.tokens
    }

    /// Path of the generated file relative to an output directory: one
    /// directory per namespace segment and a file named after the module.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = self
            .namespace
            .split(|c| c == '.' || c == ':')
            .filter(|segment| !segment.is_empty())
            .map(util::snake_name)
            .collect::<PathBuf>();
        path.push(format!("{}.rs", self.module_name));
        path
    }

    /// Renders the generated source. When formatting was requested and
    /// `rustfmt` is unavailable or fails, the unformatted code is returned.
    pub fn to_source(&self) -> String {
        let raw = self.tokens.to_string();
        if !self.rustfmt {
            return raw;
        }

        match rustfmt::format(&raw) {
            Ok(formatted) => formatted,
            Err(err) => {
                log::warn!("unable to format generated code: {}", err);
                raw
            }
        }
    }

    /// Writes the generated source to a given `Write`.
    pub fn write(&self, mut w: impl Write) -> std::io::Result<()> {
        w.write_all(self.to_source().as_bytes())?;
        w.flush()
    }

    /// Writes the generated source to the specified file, creating missing
    /// parent directories.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        self.write(BufWriter::new(file))
    }
}
