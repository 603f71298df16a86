use crate::artifact::{Member, MemberKind};
use crate::errors::GenerateError;
use crate::generate::resolve::ResolvedSignature;
use crate::generate::types::{self, TypePolicy};
use crate::util;
use proc_macro2::TokenStream;
use quote::quote;
use solwrap_common::{hash, StateMutability};

/// Expands the `Methods` accessor with one method per function.
pub(crate) fn expand(
    functions: &[ResolvedSignature],
    policy: TypePolicy,
) -> Result<(TokenStream, Vec<Member>), GenerateError> {
    if functions.is_empty() {
        return Ok((quote! {}, vec![]));
    }

    let (methods, members) = functions
        .iter()
        .map(|function| expand_function(function, policy))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .unzip::<_, _, Vec<_>, Vec<_>>();

    let tokens = quote! {
        impl Contract {
            /// Returns an object that allows accessing typed method
            /// signatures.
            pub fn methods(&self) -> Methods<'_> {
                Methods {
                    instance: &self.instance,
                }
            }
        }

        /// Type containing signatures for all methods for generated contract
        /// type.
        #[derive(Clone, Copy)]
        pub struct Methods<'a> {
            instance: &'a self::runtime::DynInstance,
        }

        impl Methods<'_> {
            #( #methods )*
        }
    };

    Ok((tokens, members))
}

fn expand_function(
    function: &ResolvedSignature,
    policy: TypePolicy,
) -> Result<(TokenStream, Member), GenerateError> {
    let entry = function.entry;
    let location = format!("function {}", entry.name());

    let names = util::expand_input_names(&entry.inputs, &[]);
    let inputs = entry
        .inputs
        .iter()
        .map(|input| types::map_parameter(input, policy, &location))
        .collect::<Result<Vec<_>, _>>()?;
    let outputs = entry
        .outputs
        .iter()
        .map(|output| types::map_parameter(output, policy, &location))
        .collect::<Result<Vec<_>, _>>()?;

    let name = util::ident(&function.accessor);
    let input_types = inputs.iter().map(types::expand).collect::<Vec<_>>();
    let output = types::expand_outputs(&outputs);
    let selector = hash::function_selector(&function.signature);
    let selector_tokens = util::expand_bytes(&selector);

    let mutability = entry.state_mutability;
    let read_only = mutability.is_read_only();
    let doc = util::expand_doc(&format!(
        "Generated by `solwrap` for `{}` (selector `0x{}`), a `{}` function. {}",
        function.signature,
        selector
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>(),
        mutability_name(mutability),
        if read_only {
            "Use `call()` to read its result."
        } else {
            "Use `send()` to submit a transaction or `call()` to simulate it \
             without changing state."
        },
    ));

    let (builder, constructor) = if read_only {
        (
            quote! { self::runtime::DynViewMethodBuilder<#output> },
            quote! { view_method },
        )
    } else {
        (
            quote! { self::runtime::DynMethodBuilder<#output> },
            quote! { method },
        )
    };

    let tokens = quote! {
        #doc
        #[allow(clippy::too_many_arguments)]
        pub fn #name(&self #(, #names: #input_types )*) -> #builder {
            self.instance.#constructor(#selector_tokens, (#( #names, )*))
        }
    };

    let member = Member {
        identifier: function.accessor.clone(),
        signature: Some(function.signature.clone()),
        kind: MemberKind::Function {
            mutability,
            submit: !read_only,
            simulate: true,
        },
        inputs: names.iter().map(ToString::to_string).zip(inputs).collect(),
        outputs,
    };

    Ok((tokens, member))
}

fn mutability_name(mutability: StateMutability) -> &'static str {
    match mutability {
        StateMutability::Pure => "pure",
        StateMutability::View => "view",
        StateMutability::NonPayable => "nonpayable",
        StateMutability::Payable => "payable",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::resolve;
    use solwrap_common::AbiLoader;
    use std::collections::HashMap;

    fn expand_json(json: &str, policy: TypePolicy) -> (TokenStream, Vec<Member>) {
        let abi = AbiLoader::new().load_from_str(json).unwrap();
        let functions = abi.functions().collect::<Vec<_>>();
        let resolved = resolve::resolve_functions(&functions, &HashMap::new()).unwrap();
        expand(&resolved, policy).unwrap()
    }

    #[test]
    fn expand_empty_methods() {
        let (tokens, members) = expand(&[], TypePolicy::Native).unwrap();
        assert_quote!(tokens, {});
        assert!(members.is_empty());
    }

    #[test]
    fn view_function_gets_read_form_only() {
        let (tokens, members) = expand_json(
            r#"[{"type":"function","name":"balanceOf","stateMutability":"view",
                 "inputs":[{"name":"owner","type":"address"}],
                 "outputs":[{"name":"","type":"uint256"}]}]"#,
            TypePolicy::Native,
        );

        assert_quote_contains!(tokens, {
            pub fn balance_of(&self, owner: self::runtime::Address)
                -> self::runtime::DynViewMethodBuilder<self::runtime::U256>
            {
                self.instance.view_method([112, 160, 130, 49], (owner,))
            }
        });
        assert_eq!(
            members[0].kind,
            MemberKind::Function {
                mutability: StateMutability::View,
                submit: false,
                simulate: true,
            },
        );
    }

    #[test]
    fn state_changing_function_gets_submit_form() {
        let (tokens, members) = expand_json(
            r#"[{"type":"function","name":"transfer","stateMutability":"nonpayable",
                 "inputs":[{"name":"to","type":"address"},{"name":"value","type":"uint256"}],
                 "outputs":[{"name":"","type":"bool"}]}]"#,
            TypePolicy::ExactWidth,
        );

        assert_quote_contains!(tokens, {
            pub fn transfer(
                &self,
                to: self::runtime::Address,
                value: self::runtime::sol::Uint<256>
            ) -> self::runtime::DynMethodBuilder<bool> {
                self.instance.method([169, 5, 156, 187], (to, value,))
            }
        });
        assert_eq!(members[0].signature.as_deref(), Some("transfer(address,uint256)"));
        assert!(matches!(
            members[0].kind,
            MemberKind::Function { submit: true, .. }
        ));
    }

    #[test]
    fn multiple_outputs_are_tuples() {
        let (tokens, _) = expand_json(
            r#"[{"type":"function","name":"reserves","stateMutability":"view",
                 "outputs":[{"name":"a","type":"uint112"},{"name":"b","type":"uint32"}]}]"#,
            TypePolicy::Native,
        );

        assert_quote_contains!(tokens, {
            -> self::runtime::DynViewMethodBuilder<(u128, u32)>
        });
    }

    #[test]
    fn unsupported_output_type() {
        let abi = AbiLoader::new()
            .load_from_str(
                r#"[{"type":"function","name":"f","outputs":[{"name":"","type":"ufixed128x18"}]}]"#,
            )
            .unwrap();
        let functions = abi.functions().collect::<Vec<_>>();
        let resolved = resolve::resolve_functions(&functions, &HashMap::new()).unwrap();

        assert!(matches!(
            expand(&resolved, TypePolicy::Native),
            Err(GenerateError::UnsupportedType { .. })
        ));
    }
}
