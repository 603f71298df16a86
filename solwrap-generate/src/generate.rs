//! Expansion of a loaded ABI into a contract wrapper.

mod common;
mod deployment;
mod events;
mod methods;
pub mod resolve;
pub mod types;

use crate::artifact::ContractArtifact;
use crate::errors::GenerateError;
use crate::generate::types::TypePolicy;
use crate::{util, ContractBuilder};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use solwrap_common::{Abi, Bytecode};
use std::collections::HashMap;
use syn::{Path, Visibility};

/// Internal shared context for generating smart contract bindings.
pub(crate) struct Context<'a> {
    /// The loaded contract interface.
    abi: &'a Abi,

    /// The bytecode to embed for deployments.
    bytecode: &'a Bytecode,

    /// The identifier for the runtime crate the generated code refers to.
    runtime_crate: Ident,

    /// The visibility for the generated module and re-exported contract type.
    visibility: Visibility,

    /// The name of the module in which to place the contract implementation.
    /// Note that the main contract type gets re-exported in the root.
    contract_mod: Ident,

    /// The contract name as an identifier.
    contract_name: Ident,

    /// The namespace the contract is generated for.
    namespace: String,

    /// The integer mapping policy.
    policy: TypePolicy,

    /// Manually specified method aliases, keyed by signature.
    method_aliases: HashMap<String, String>,

    /// Derives added to event structs.
    event_derives: Vec<Path>,
}

impl<'a> Context<'a> {
    /// Creates a context from the code generation arguments.
    fn from_builder(
        name: &str,
        abi: &'a Abi,
        bytecode: &'a Bytecode,
        builder: ContractBuilder,
    ) -> Result<Self, GenerateError> {
        let raw_contract_name = builder
            .contract_name_override
            .as_deref()
            .unwrap_or(name);
        if raw_contract_name.is_empty() {
            return Err(GenerateError::Config("contract name is empty".into()));
        }
        let contract_name = parse_ident("contract name", raw_contract_name)?;

        let runtime_crate = parse_ident("runtime crate name", &builder.runtime_crate_name)?;
        let visibility = match &builder.visibility_modifier {
            Some(vis) => syn::parse_str(vis).map_err(|err| {
                GenerateError::Config(format!("invalid visibility modifier '{}': {}", vis, err))
            })?,
            None => Visibility::Inherited,
        };
        let contract_mod = match &builder.contract_mod_override {
            Some(name) => parse_ident("module name", name)?,
            None => util::ident(&util::snake_name(raw_contract_name)),
        };

        let mut method_aliases = HashMap::new();
        for (signature, alias) in builder.method_aliases {
            parse_ident("method alias", &alias)?;
            if method_aliases.insert(signature.clone(), alias).is_some() {
                return Err(GenerateError::Config(format!(
                    "duplicate method signature '{}' in method aliases",
                    signature,
                )));
            }
        }

        let event_derives = builder
            .event_derives
            .iter()
            .map(|derive| {
                syn::parse_str::<Path>(derive).map_err(|err| {
                    GenerateError::Config(format!("failed to parse event derive '{}': {}", derive, err))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Context {
            abi,
            bytecode,
            runtime_crate,
            visibility,
            contract_mod,
            contract_name,
            namespace: builder.namespace,
            policy: builder.type_policy,
            method_aliases,
            event_derives,
        })
    }
}

/// Parses a configured name as a plain identifier. Keywords and raw
/// identifiers such as `r#type` are rejected.
fn parse_ident(what: &str, name: &str) -> Result<Ident, GenerateError> {
    match syn::parse_str::<Ident>(name) {
        Ok(ident) if !name.starts_with("r#") => Ok(ident),
        _ => Err(GenerateError::Config(format!(
            "{} '{}' is not a valid identifier",
            what, name
        ))),
    }
}

#[cfg(test)]
impl<'a> Context<'a> {
    /// Creates a context with default settings for a contract named
    /// `Contract`.
    pub(crate) fn for_test(abi: &'a Abi, bytecode: &'a Bytecode) -> Self {
        Context::from_builder("Contract", abi, bytecode, ContractBuilder::new())
            .expect("default context is valid")
    }
}

/// Expands the ABI into a contract artifact. Either every member expands or
/// an error is returned and nothing is emitted.
pub(crate) fn expand(
    name: &str,
    abi: &Abi,
    bytecode: &Bytecode,
    builder: ContractBuilder,
) -> Result<ContractArtifact, GenerateError> {
    let rustfmt = builder.rustfmt;
    let cx = Context::from_builder(name, abi, bytecode, builder)?;

    let functions = cx.abi.functions().collect::<Vec<_>>();
    let functions = resolve::resolve_functions(&functions, &cx.method_aliases)?;
    let events = cx.abi.events().collect::<Vec<_>>();
    let events = resolve::resolve_events(&events)?;

    let common = common::expand(&cx);
    let (deployment, deploy) = deployment::expand(&cx)?;
    let (methods, function_members) = methods::expand(&functions, cx.policy)?;
    let (events, event_members) = events::expand(&cx, &events)?;

    let runtime_crate = &cx.runtime_crate;
    let vis = &cx.visibility;
    let contract_mod = &cx.contract_mod;
    let contract_name = &cx.contract_name;
    let doc = util::expand_doc(&if cx.namespace.is_empty() {
        format!("Generated bindings for the `{}` contract.", contract_name)
    } else {
        format!(
            "Generated bindings for the `{}` contract in `{}`.",
            contract_name, cx.namespace
        )
    });

    let tokens = quote! {
        #doc
        #[allow(dead_code)]
        #vis mod #contract_mod {
            #[rustfmt::skip]
            use #runtime_crate as runtime;

            #common
            #deployment
            #methods
            #events
        }
        #vis use self::#contract_mod::Contract as #contract_name;
    };

    let mut members = Vec::with_capacity(1 + function_members.len() + event_members.len());
    members.push(deploy);
    members.extend(function_members);
    members.extend(event_members);
    log::debug!(
        "expanded {} members for contract {}",
        members.len(),
        contract_name
    );

    Ok(ContractArtifact {
        namespace: cx.namespace.clone(),
        contract_name: contract_name.to_string(),
        module_name: contract_mod.to_string(),
        bytecode: cx.bytecode.as_text().map(str::to_string),
        policy: cx.policy,
        members,
        tokens,
        rustfmt,
    })
}
