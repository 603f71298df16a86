//! The Solidity ABI type grammar.
//!
//! Raw type strings from an ABI document (`uint256`, `bytes32[]`,
//! `tuple[2]` with its `components`) are parsed into a [`ParamType`] tree.
//! The tree is policy independent; mapping it onto target types is done by
//! the code generator.

use crate::abi::AbiParameter;
use crate::errors::ParseParamTypeError;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A parsed ABI parameter type.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ParamType {
    /// `address`
    Address,
    /// `bool`
    Bool,
    /// `string`
    String,
    /// `bytes`
    Bytes,
    /// `bytesN` with `1 <= N <= 32`.
    FixedBytes(usize),
    /// `uintN` with `8 <= N <= 256` and `N % 8 == 0`.
    Uint(usize),
    /// `intN` with `8 <= N <= 256` and `N % 8 == 0`.
    Int(usize),
    /// `T[]`
    Array(Box<ParamType>),
    /// `T[N]`
    FixedArray(Box<ParamType>, usize),
    /// `tuple`, with its named components in declaration order.
    Tuple(Vec<(String, ParamType)>),
}

impl ParamType {
    /// Parses a raw type string. The `components` are only consulted when the
    /// innermost element type is `tuple`.
    pub fn parse(raw: &str, components: &[AbiParameter]) -> Result<Self, ParseParamTypeError> {
        let err = || ParseParamTypeError(raw.to_string());
        let raw = raw.trim();

        if let Some(stripped) = raw.strip_suffix(']') {
            let open = stripped.rfind('[').ok_or_else(err)?;
            let element = ParamType::parse(&stripped[..open], components)
                .map_err(|_| err())?;
            let size = &stripped[open + 1..];
            if size.is_empty() {
                return Ok(ParamType::Array(Box::new(element)));
            }
            return match parse_size(size) {
                Some(n) if n > 0 => Ok(ParamType::FixedArray(Box::new(element), n)),
                _ => Err(err()),
            };
        }

        if raw == "tuple" {
            if components.is_empty() {
                return Err(err());
            }
            let components = components
                .iter()
                .map(|component| Ok((component.name.clone(), component.param_type()?)))
                .collect::<Result<Vec<_>, ParseParamTypeError>>()?;
            return Ok(ParamType::Tuple(components));
        }

        raw.parse().map_err(|_| err())
    }

    /// Returns `true` for elementary value types, the ones that are stored
    /// verbatim in an event topic rather than hashed.
    pub fn is_value_type(&self) -> bool {
        matches!(
            self,
            ParamType::Address
                | ParamType::Bool
                | ParamType::FixedBytes(_)
                | ParamType::Uint(_)
                | ParamType::Int(_)
        )
    }

    /// Returns the maximum nesting depth of this type, `1` for elementary
    /// types.
    pub fn depth(&self) -> usize {
        match self {
            ParamType::Array(inner) | ParamType::FixedArray(inner, _) => 1 + inner.depth(),
            ParamType::Tuple(components) => {
                1 + components
                    .iter()
                    .map(|(_, kind)| kind.depth())
                    .max()
                    .unwrap_or(0)
            }
            _ => 1,
        }
    }
}

/// Parses an array length or bit width, rejecting signs and leading zeros so
/// that every accepted string is canonical.
fn parse_size(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) || (s.len() > 1 && s.starts_with('0'))
    {
        return None;
    }
    s.parse().ok()
}

fn integer_width(s: &str) -> Option<usize> {
    if s.is_empty() {
        return Some(256);
    }
    parse_size(s).filter(|n| (8..=256).contains(n) && n % 8 == 0)
}

impl FromStr for ParamType {
    type Err = ParseParamTypeError;

    /// Parses elementary types and arrays of them. Tuples need their
    /// components and must go through [`ParamType::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseParamTypeError(s.to_string());

        if s.ends_with(']') {
            return ParamType::parse(s, &[]);
        }

        let kind = match s {
            "address" => ParamType::Address,
            "bool" => ParamType::Bool,
            "string" => ParamType::String,
            "bytes" => ParamType::Bytes,
            "byte" => ParamType::FixedBytes(1),
            _ => {
                if let Some(width) = s.strip_prefix("uint") {
                    ParamType::Uint(integer_width(width).ok_or_else(err)?)
                } else if let Some(width) = s.strip_prefix("int") {
                    ParamType::Int(integer_width(width).ok_or_else(err)?)
                } else if let Some(size) = s.strip_prefix("bytes") {
                    let size = parse_size(size)
                        .filter(|n| (1..=32).contains(n))
                        .ok_or_else(err)?;
                    ParamType::FixedBytes(size)
                } else {
                    return Err(err());
                }
            }
        };

        Ok(kind)
    }
}

impl Display for ParamType {
    /// Formats the canonical type, as used in signatures and selectors.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ParamType::Address => f.write_str("address"),
            ParamType::Bool => f.write_str("bool"),
            ParamType::String => f.write_str("string"),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::FixedBytes(n) => write!(f, "bytes{}", n),
            ParamType::Uint(n) => write!(f, "uint{}", n),
            ParamType::Int(n) => write!(f, "int{}", n),
            ParamType::Array(inner) => write!(f, "{}[]", inner),
            ParamType::FixedArray(inner, n) => write!(f, "{}[{}]", inner, n),
            ParamType::Tuple(components) => {
                f.write_str("(")?;
                for (i, (_, kind)) in components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", kind)?;
                }
                f.write_str(")")
            }
        }
    }
}
