//! Resolution of the identifiers emitted for functions and events.
//!
//! Solidity allows overloading: several functions (or events) may share a
//! name as long as their parameter types differ. Rust has no such dispatch,
//! so every member of an overload set gets the identifier-safe rendering of
//! its canonical parameter types appended to its name. The whole overload
//! set is computed before any renaming so results do not depend on which
//! overload comes first.

use crate::errors::GenerateError;
use crate::util;
use solwrap_common::{AbiEntry, EntryKind, ParamType};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Suffix used for overloads without parameters.
const NO_ARGS_SUFFIX: &str = "no_args";

/// A function or event with the identifiers it is emitted under.
#[derive(Clone, Debug)]
pub struct ResolvedSignature<'a> {
    /// The resolved entry.
    pub entry: &'a AbiEntry,
    /// The parsed input types, in order.
    pub params: Vec<ParamType>,
    /// The canonical signature, for example `transfer(address,uint256)`.
    pub signature: String,
    /// The type level identifier. Event data structs are named after it,
    /// for functions it is the same as `accessor`.
    pub identifier: String,
    /// The method identifier: the contract method for functions and the
    /// filter constructor for events.
    pub accessor: String,
}

/// Resolves identifiers for all function entries, in input order. Manual
/// aliases are keyed by canonical signature and take precedence over the
/// automatic naming.
pub fn resolve_functions<'a>(
    functions: &[&'a AbiEntry],
    aliases: &HashMap<String, String>,
) -> Result<Vec<ResolvedSignature<'a>>, GenerateError> {
    resolve(functions, aliases)
}

/// Resolves identifiers for all event entries, in input order. Events live in
/// their own namespace and never collide with functions.
pub fn resolve_events<'a>(
    events: &[&'a AbiEntry],
) -> Result<Vec<ResolvedSignature<'a>>, GenerateError> {
    resolve(events, &HashMap::new())
}

fn resolve<'a>(
    entries: &[&'a AbiEntry],
    aliases: &HashMap<String, String>,
) -> Result<Vec<ResolvedSignature<'a>>, GenerateError> {
    let params = entries
        .iter()
        .map(|entry| {
            entry
                .input_types()
                .map_err(|err| GenerateError::UnsupportedType {
                    kind: err.0,
                    location: describe(entry),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut overloads = HashMap::<&str, usize>::new();
    for entry in entries {
        *overloads.entry(entry.name()).or_default() += 1;
    }

    let mut resolved = Vec::with_capacity(entries.len());
    for (entry, params) in entries.iter().copied().zip(params) {
        let signature = format!(
            "{}({})",
            entry.name(),
            params
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
        );

        let (identifier, accessor) = if let Some(alias) = aliases.get(&signature) {
            (alias.clone(), alias.clone())
        } else {
            let suffix = if overloads[entry.name()] > 1 {
                Some(overload_suffix(&params))
            } else {
                None
            };
            let accessor = match &suffix {
                Some(suffix) => format!("{}_{}", util::snake_name(entry.name()), suffix),
                None => util::snake_name(entry.name()),
            };
            match entry.kind {
                EntryKind::Event => {
                    let mut identifier = util::pascal_name(entry.name());
                    if let Some(suffix) = &suffix {
                        identifier.extend(suffix.split('_').map(util::capitalize_first));
                    }
                    (identifier, accessor)
                }
                _ => (accessor.clone(), accessor),
            }
        };

        resolved.push(ResolvedSignature {
            entry,
            params,
            signature,
            identifier,
            accessor,
        });
    }

    check_unique(&resolved, |r| r.accessor.as_str())?;
    check_unique(&resolved, |r| r.identifier.as_str())?;

    Ok(resolved)
}

fn check_unique<'r, 'a, F>(
    resolved: &'r [ResolvedSignature<'a>],
    name: F,
) -> Result<(), GenerateError>
where
    F: Fn(&'r ResolvedSignature<'a>) -> &'r str,
{
    let mut seen = HashMap::<&str, &str>::new();
    for r in resolved {
        match seen.entry(name(r)) {
            Entry::Vacant(v) => {
                v.insert(r.signature.as_str());
            }
            Entry::Occupied(o) => {
                return Err(GenerateError::UnresolvableCollision {
                    identifier: name(r).to_string(),
                    first: o.get().to_string(),
                    second: r.signature.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Renders a parameter type list as an identifier fragment, for example
/// `uint256_address` or `uint8_array3`.
pub fn overload_suffix(params: &[ParamType]) -> String {
    if params.is_empty() {
        return NO_ARGS_SUFFIX.to_string();
    }
    params
        .iter()
        .map(type_suffix)
        .collect::<Vec<_>>()
        .join("_")
}

fn type_suffix(kind: &ParamType) -> String {
    match kind {
        ParamType::Array(inner) => format!("{}_array", type_suffix(inner)),
        ParamType::FixedArray(inner, n) => format!("{}_array{}", type_suffix(inner), n),
        ParamType::Tuple(components) => format!(
            "tuple_{}_end",
            components
                .iter()
                .map(|(_, kind)| type_suffix(kind))
                .collect::<Vec<_>>()
                .join("_"),
        ),
        kind => kind.to_string(),
    }
}

fn describe(entry: &AbiEntry) -> String {
    let kind = match entry.kind {
        EntryKind::Event => "event",
        _ => "function",
    };
    format!("{} {}", kind, entry.name())
}
