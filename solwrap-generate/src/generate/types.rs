//! Mapping of Solidity types onto Rust types.

use crate::errors::GenerateError;
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use solwrap_common::{AbiParameter, ParamType};

/// Widest integer that maps to a Rust primitive under the native policy.
const NATIVE_INTEGER_LIMIT: usize = 128;

/// Largest array length for which the standard library implements `Default`.
const DEFAULT_ARRAY_LIMIT: usize = 32;

/// Largest tuple arity for which the standard library implements `Default`.
const DEFAULT_TUPLE_LIMIT: usize = 12;

/// How Solidity integers are represented in the generated code.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TypePolicy {
    /// Use Rust primitives where they hold the full range and the runtime's
    /// 256-bit integers otherwise.
    ///
    /// Since Rust has 128-bit primitives, every integer up to 128 bits maps to
    /// the smallest fitting primitive (`uint24` to `u32`, `int112` to `i128`),
    /// not only those up to 32 bits. Wider integers map to `U256`/`I256`.
    Native,
    /// Use the runtime's fixed width wrappers, preserving the declared bit
    /// width of every integer.
    ExactWidth,
}

impl Default for TypePolicy {
    fn default() -> Self {
        TypePolicy::Native
    }
}

/// How an integer is represented.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IntegerRepr {
    /// A Rust primitive of the given width.
    Primitive(usize),
    /// The runtime's 256-bit big integer.
    Big,
    /// The runtime's exact-width wrapper.
    ExactWidth,
}

/// The target type chosen for a Solidity type under a policy.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeDescriptor {
    /// `address`
    Address,
    /// `bool`
    Bool,
    /// `string`
    String,
    /// `bytes`
    Bytes,
    /// `bytesN`
    FixedBytes(usize),
    /// `uintN` and `intN`.
    Integer {
        /// `true` for `intN`.
        signed: bool,
        /// The declared width `N`.
        bits: usize,
        /// The chosen representation.
        repr: IntegerRepr,
    },
    /// `T[]` when `len` is `None`, `T[N]` otherwise.
    Array {
        /// The element type.
        element: Box<TypeDescriptor>,
        /// The fixed length.
        len: Option<usize>,
    },
    /// A tuple with its named components in declaration order.
    Tuple(Vec<(String, TypeDescriptor)>),
}

impl TypeDescriptor {
    /// Returns `true` if the mapped Rust type implements `Default`.
    pub fn supports_default(&self) -> bool {
        match self {
            TypeDescriptor::FixedBytes(n) => *n <= DEFAULT_ARRAY_LIMIT,
            TypeDescriptor::Array {
                element,
                len: Some(n),
            } => *n <= DEFAULT_ARRAY_LIMIT && element.supports_default(),
            TypeDescriptor::Array { len: None, .. } => true,
            TypeDescriptor::Tuple(components) => {
                components.len() <= DEFAULT_TUPLE_LIMIT
                    && components
                        .iter()
                        .all(|(_, component)| component.supports_default())
            }
            _ => true,
        }
    }
}

/// Maps a parameter, parsing its raw type and components, onto a target type.
pub fn map_parameter(
    param: &AbiParameter,
    policy: TypePolicy,
    location: &str,
) -> Result<TypeDescriptor, GenerateError> {
    let kind = param
        .param_type()
        .map_err(|err| GenerateError::UnsupportedType {
            kind: err.0,
            location: location.to_string(),
        })?;
    Ok(map(&kind, policy))
}

/// Maps a parsed type onto a target type.
pub fn map(kind: &ParamType, policy: TypePolicy) -> TypeDescriptor {
    match kind {
        ParamType::Address => TypeDescriptor::Address,
        ParamType::Bool => TypeDescriptor::Bool,
        ParamType::String => TypeDescriptor::String,
        ParamType::Bytes => TypeDescriptor::Bytes,
        ParamType::FixedBytes(n) => TypeDescriptor::FixedBytes(*n),
        ParamType::Uint(bits) => map_integer(false, *bits, policy),
        ParamType::Int(bits) => map_integer(true, *bits, policy),
        ParamType::Array(inner) => TypeDescriptor::Array {
            element: Box::new(map(inner, policy)),
            len: None,
        },
        ParamType::FixedArray(inner, n) => TypeDescriptor::Array {
            element: Box::new(map(inner, policy)),
            len: Some(*n),
        },
        ParamType::Tuple(components) => TypeDescriptor::Tuple(
            components
                .iter()
                .map(|(name, kind)| (name.clone(), map(kind, policy)))
                .collect(),
        ),
    }
}

fn map_integer(signed: bool, bits: usize, policy: TypePolicy) -> TypeDescriptor {
    let repr = match policy {
        TypePolicy::ExactWidth => IntegerRepr::ExactWidth,
        TypePolicy::Native if bits <= NATIVE_INTEGER_LIMIT => {
            IntegerRepr::Primitive(bits.next_power_of_two().max(8))
        }
        TypePolicy::Native => IntegerRepr::Big,
    };
    TypeDescriptor::Integer { signed, bits, repr }
}

/// Expands a target type into the Rust type tokens used by the generated
/// code. Runtime types are referred to through the `runtime` alias that
/// every generated module imports.
pub fn expand(ty: &TypeDescriptor) -> TokenStream {
    match ty {
        TypeDescriptor::Address => quote! { self::runtime::Address },
        TypeDescriptor::Bool => quote! { bool },
        TypeDescriptor::String => quote! { ::std::string::String },
        TypeDescriptor::Bytes => quote! { ::std::vec::Vec<u8> },
        TypeDescriptor::FixedBytes(n) => {
            let size = Literal::usize_unsuffixed(*n);
            quote! { [u8; #size] }
        }
        TypeDescriptor::Integer { signed, bits, repr } => match repr {
            IntegerRepr::Primitive(width) => {
                let name = format!("{}{}", if *signed { 'i' } else { 'u' }, width);
                let primitive = crate::util::ident(&name);
                quote! { #primitive }
            }
            IntegerRepr::Big if *signed => quote! { self::runtime::I256 },
            IntegerRepr::Big => quote! { self::runtime::U256 },
            IntegerRepr::ExactWidth => {
                let bits = Literal::usize_unsuffixed(*bits);
                if *signed {
                    quote! { self::runtime::sol::Int<#bits> }
                } else {
                    quote! { self::runtime::sol::Uint<#bits> }
                }
            }
        },
        TypeDescriptor::Array { element, len } => {
            let inner = expand(element);
            match len {
                Some(n) => {
                    let size = Literal::usize_unsuffixed(*n);
                    quote! { [#inner; #size] }
                }
                None => quote! { ::std::vec::Vec<#inner> },
            }
        }
        TypeDescriptor::Tuple(components) => {
            let components = components.iter().map(|(_, component)| expand(component));
            quote! { (#( #components ,)*) }
        }
    }
}

/// Expands the tokens for a list of outputs: `()` when empty, the single
/// type for one output and a tuple otherwise.
pub fn expand_outputs(outputs: &[TypeDescriptor]) -> TokenStream {
    match outputs {
        [] => quote! { () },
        [single] => expand(single),
        outputs => {
            let types = outputs.iter().map(expand);
            quote! { (#( #types ),*) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn native(s: &str) -> TypeDescriptor {
        map(&s.parse().unwrap(), TypePolicy::Native)
    }

    fn exact(s: &str) -> TypeDescriptor {
        map(&s.parse().unwrap(), TypePolicy::ExactWidth)
    }

    #[test]
    fn native_integers() {
        for (kind, expected) in &[
            ("uint8", 8),
            ("uint16", 16),
            ("uint24", 32),
            ("uint32", 32),
            ("uint40", 64),
            ("uint64", 64),
            ("uint72", 128),
            ("uint128", 128),
        ] {
            assert_eq!(
                native(kind),
                TypeDescriptor::Integer {
                    signed: false,
                    bits: kind[4..].parse().unwrap(),
                    repr: IntegerRepr::Primitive(*expected),
                },
                "{}",
                kind,
            );
        }
        assert_quote!(expand(&native("uint32")), { u32 });
        assert_quote!(expand(&native("int16")), { i16 });
    }

    #[test]
    fn native_big_integers() {
        assert_quote!(expand(&native("uint256")), { self::runtime::U256 });
        assert_quote!(expand(&native("int136")), { self::runtime::I256 });
    }

    #[test]
    fn exact_width_integers() {
        assert_eq!(
            exact("uint256"),
            TypeDescriptor::Integer {
                signed: false,
                bits: 256,
                repr: IntegerRepr::ExactWidth,
            },
        );
        assert_quote!(expand(&exact("uint256")), { self::runtime::sol::Uint<256> });
        assert_quote!(expand(&exact("int8")), { self::runtime::sol::Int<8> });
    }

    #[test]
    fn policy_independent_types() {
        for policy in &[TypePolicy::Native, TypePolicy::ExactWidth] {
            for (kind, expected) in &[
                ("address", TypeDescriptor::Address),
                ("bool", TypeDescriptor::Bool),
                ("string", TypeDescriptor::String),
                ("bytes", TypeDescriptor::Bytes),
                ("bytes32", TypeDescriptor::FixedBytes(32)),
            ] {
                assert_eq!(map(&kind.parse().unwrap(), *policy), *expected);
            }
        }
    }

    #[test]
    fn fixed_array_of_small_integers() {
        assert_eq!(
            native("uint8[3]"),
            TypeDescriptor::Array {
                element: Box::new(TypeDescriptor::Integer {
                    signed: false,
                    bits: 8,
                    repr: IntegerRepr::Primitive(8),
                }),
                len: Some(3),
            },
        );
        assert_quote!(expand(&native("uint8[3]")), { [u8; 3] });
        assert_quote!(expand(&native("address[][2]")), {
            [::std::vec::Vec<self::runtime::Address>; 2]
        });
    }

    #[test]
    fn tuples_keep_component_names() {
        let param = AbiParameter {
            name: "order".into(),
            kind: "tuple[]".into(),
            components: vec![
                AbiParameter {
                    name: "owner".into(),
                    kind: "address".into(),
                    ..Default::default()
                },
                AbiParameter {
                    name: "amount".into(),
                    kind: "uint256".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let ty = map_parameter(&param, TypePolicy::Native, "function fill").unwrap();

        match &ty {
            TypeDescriptor::Array { element, len: None } => match &**element {
                TypeDescriptor::Tuple(components) => {
                    let names = components.iter().map(|(name, _)| name.as_str());
                    assert_eq!(names.collect::<Vec<_>>(), ["owner", "amount"]);
                }
                other => panic!("expected tuple, got {:?}", other),
            },
            other => panic!("expected array, got {:?}", other),
        }
        assert_quote!(expand(&ty), {
            ::std::vec::Vec<(self::runtime::Address, self::runtime::U256,)>
        });
    }

    #[test]
    fn unsupported_type() {
        let param = AbiParameter {
            name: "x".into(),
            kind: "ufixed999x999".into(),
            ..Default::default()
        };
        match map_parameter(&param, TypePolicy::Native, "function f") {
            Err(GenerateError::UnsupportedType { kind, location }) => {
                assert_eq!(kind, "ufixed999x999");
                assert_eq!(location, "function f");
            }
            other => panic!("expected unsupported type error, got {:?}", other),
        }
    }

    #[test]
    fn default_support() {
        assert!(native("bytes32").supports_default());
        assert!(native("uint8[32]").supports_default());
        assert!(!native("uint8[33]").supports_default());
        assert!(native("uint8[33][]").supports_default());
        assert!(!native("uint8[][33]").supports_default());
    }

    #[test]
    fn expand_output_lists() {
        assert_quote!(expand_outputs(&[]), { () });
        assert_quote!(expand_outputs(&[native("bool")]), { bool });
        assert_quote!(expand_outputs(&[native("bool"), native("uint256")]), {
            (bool, self::runtime::U256)
        });
    }
}
