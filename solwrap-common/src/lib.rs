#![deny(missing_docs, unsafe_code)]

//! Crate for the types shared by the `solwrap` code generator and its
//! command line driver: the ABI model, the Solidity type grammar and the ABI
//! loader.

pub mod abi;
pub mod bytecode;
pub mod errors;
pub mod hash;
pub mod loader;
pub mod param_type;

pub use crate::abi::{Abi, AbiEntry, AbiParameter, EntryKind, StateMutability};
pub use crate::bytecode::Bytecode;
pub use crate::loader::AbiLoader;
pub use crate::param_type::ParamType;
