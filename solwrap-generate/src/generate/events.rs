use crate::artifact::{Member, MemberKind};
use crate::errors::GenerateError;
use crate::generate::resolve::ResolvedSignature;
use crate::generate::types::{self, TypeDescriptor};
use crate::generate::Context;
use crate::util;
use proc_macro2::{Ident, Literal, TokenStream};
use quote::quote;
use solwrap_common::hash;

/// An event parameter ready for expansion.
struct Field {
    name: Ident,
    ty: TypeDescriptor,
    indexed: bool,
    /// Whether the value is stored verbatim in its topic, as opposed to its
    /// hash.
    value_topic: bool,
}

pub(crate) fn expand(
    cx: &Context,
    events: &[ResolvedSignature],
) -> Result<(TokenStream, Vec<Member>), GenerateError> {
    if events.is_empty() {
        return Ok((quote! {}, vec![]));
    }

    let mut structs = Vec::with_capacity(events.len());
    let mut builders = Vec::with_capacity(events.len());
    let mut filters = Vec::with_capacity(events.len());
    let mut members = Vec::with_capacity(events.len());
    for event in events {
        let fields = expand_fields(cx, event)?;
        structs.push(expand_struct(cx, event, &fields));
        builders.push(expand_builder(event, &fields));
        filters.push(expand_filter(event));
        members.push(Member {
            identifier: event.identifier.clone(),
            signature: Some(event.signature.clone()),
            kind: MemberKind::Event {
                anonymous: event.entry.anonymous,
                indexed: fields
                    .iter()
                    .filter(|field| field.indexed)
                    .map(|field| field.name.to_string())
                    .collect(),
            },
            inputs: fields
                .into_iter()
                .map(|field| (field.name.to_string(), field.ty))
                .collect(),
            outputs: vec![],
        });
    }

    let tokens = quote! {
        /// Module containing all generated data models for this contract's
        /// events.
        pub mod events {
            use super::runtime;

            #( #structs )*
        }

        /// Module containing builders for filtered streams of this contract's
        /// events.
        pub mod event_builders {
            use super::runtime;

            #( #builders )*
        }

        impl Contract {
            /// Retrieves a handle to a type containing for creating event
            /// streams for all the contract events.
            pub fn events(&self) -> Events<'_> {
                Events {
                    instance: &self.instance,
                }
            }
        }

        /// Type containing filter builders for all contract events.
        #[derive(Clone, Copy)]
        pub struct Events<'a> {
            instance: &'a self::runtime::DynInstance,
        }

        impl Events<'_> {
            #( #filters )*
        }
    };

    Ok((tokens, members))
}

fn expand_fields(cx: &Context, event: &ResolvedSignature) -> Result<Vec<Field>, GenerateError> {
    let location = format!("event {}", event.entry.name());
    let names = util::expand_input_names(&event.entry.inputs, &[]);
    event
        .entry
        .inputs
        .iter()
        .zip(names)
        .zip(&event.params)
        .map(|((input, name), kind)| {
            Ok(Field {
                name,
                ty: types::map_parameter(input, cx.policy, &location)?,
                indexed: input.indexed,
                value_topic: kind.is_value_type(),
            })
        })
        .collect()
}

fn expand_struct(cx: &Context, event: &ResolvedSignature, fields: &[Field]) -> TokenStream {
    let event_name = util::ident(&event.identifier);
    let doc = util::expand_doc(&format!(
        "Data of the `{}` event{}.",
        event.signature,
        if event.entry.anonymous {
            ", an anonymous event"
        } else {
            ""
        },
    ));
    let signature = expand_hash(hash::event_topic(&event.signature));
    let abi_signature = Literal::string(&event.signature);

    let field_types = fields
        .iter()
        .map(|field| types::expand(&field.ty))
        .collect::<Vec<_>>();
    let body = if event.entry.inputs.iter().all(|input| input.name.is_empty()) {
        quote! { ( #( pub #field_types, )* ); }
    } else {
        let names = fields.iter().map(|field| &field.name);
        quote! { { #( pub #names: #field_types, )* } }
    };

    let default = if fields.iter().all(|field| field.ty.supports_default()) {
        quote! { Default, }
    } else {
        quote! {}
    };
    let derives = &cx.event_derives;

    quote! {
        #doc
        #[derive(Clone, Debug, #default Eq, PartialEq #(, #derives )*)]
        pub struct #event_name #body

        impl #event_name {
            /// Retrieves the signature for the event this data corresponds to.
            /// This signature is the Keccak-256 hash of the ABI signature of
            /// this event.
            pub fn signature() -> self::runtime::H256 {
                #signature
            }

            /// Retrieves the ABI signature for the event this data corresponds
            /// to.
            pub fn abi_signature() -> &'static str {
                #abi_signature
            }
        }
    }
}

fn expand_builder(event: &ResolvedSignature, fields: &[Field]) -> TokenStream {
    let event_name = util::ident(&event.identifier);
    let builder_name = builder_ident(event);
    let doc = util::expand_doc(&format!(
        "A builder for a filtered stream of `{}` events.",
        event.identifier
    ));

    let setters = fields
        .iter()
        .filter(|field| field.indexed)
        .enumerate()
        .map(|(position, field)| {
            let name = &field.name;
            let position = Literal::usize_unsuffixed(position);
            let topic = if field.value_topic {
                types::expand(&field.ty)
            } else {
                quote! { self::runtime::H256 }
            };
            let doc = util::expand_doc(&format!(
                "Filters events by the indexed `{}` parameter.{}",
                name,
                if field.value_topic {
                    ""
                } else {
                    " Dynamic values are matched by their Keccak-256 hash."
                },
            ));

            quote! {
                #doc
                pub fn #name(self, topic: self::runtime::Topic<#topic>) -> Self {
                    #builder_name(self.0.topic(#position, topic))
                }
            }
        })
        .collect::<Vec<_>>();

    quote! {
        #doc
        pub struct #builder_name(pub self::runtime::DynEventBuilder<super::events::#event_name>);

        impl #builder_name {
            #( #setters )*
        }

        impl From<#builder_name> for self::runtime::DynEventBuilder<super::events::#event_name> {
            fn from(builder: #builder_name) -> Self {
                builder.0
            }
        }
    }
}

fn expand_filter(event: &ResolvedSignature) -> TokenStream {
    let name = util::ident(&event.accessor);
    let event_name = util::ident(&event.identifier);
    let builder_name = builder_ident(event);
    let topic = if event.entry.anonymous {
        quote! { None }
    } else {
        quote! { Some(self::events::#event_name::signature()) }
    };

    quote! {
        /// Generated by `solwrap`.
        pub fn #name(&self) -> self::event_builders::#builder_name {
            self::event_builders::#builder_name(self.instance.event(#topic))
        }
    }
}

fn builder_ident(event: &ResolvedSignature) -> Ident {
    util::ident(&format!("{}Builder", event.identifier))
}

/// Expands a 256-bit hash into a literal representation that can be used with
/// quasi-quoting for code generation.
fn expand_hash(hash: [u8; 32]) -> TokenStream {
    let bytes = util::expand_bytes(&hash);
    quote! {
        self::runtime::H256::from(#bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::resolve;
    use solwrap_common::{Abi, AbiLoader, Bytecode};

    const TRANSFER: &str = r#"[{"type":"event","name":"Transfer","anonymous":false,
        "inputs":[{"name":"from","type":"address","indexed":true},
                  {"name":"to","type":"address","indexed":true},
                  {"name":"memo","type":"string","indexed":true},
                  {"name":"amount","type":"uint256","indexed":false}]}]"#;

    fn expand_json(json: &str) -> (TokenStream, Vec<Member>) {
        let abi = AbiLoader::new().load_from_str(json).unwrap();
        let bytecode = Bytecode::not_provided();
        let cx = Context::for_test(&abi, &bytecode);
        let events = abi.events().collect::<Vec<_>>();
        let resolved = resolve::resolve_events(&events).unwrap();
        expand(&cx, &resolved).unwrap()
    }

    #[test]
    fn expand_empty_events() {
        let abi = Abi::default();
        let bytecode = Bytecode::not_provided();
        let cx = Context::for_test(&abi, &bytecode);
        let (tokens, members) = expand(&cx, &[]).unwrap();

        assert_quote!(tokens, {});
        assert!(members.is_empty());
    }

    #[test]
    fn expand_transfer_struct() {
        let (tokens, members) = expand_json(TRANSFER);

        assert_quote_contains!(tokens, {
            #[derive(Clone, Debug, Default, Eq, PartialEq)]
            pub struct Transfer {
                pub from: self::runtime::Address,
                pub to: self::runtime::Address,
                pub memo: ::std::string::String,
                pub amount: self::runtime::U256,
            }
        });
        assert_eq!(
            members[0].kind,
            MemberKind::Event {
                anonymous: false,
                indexed: vec!["from".into(), "to".into(), "memo".into()],
            },
        );
    }

    #[test]
    fn expand_transfer_builder() {
        let (tokens, _) = expand_json(TRANSFER);

        assert_quote_contains!(tokens, {
            pub fn from(self, topic: self::runtime::Topic<self::runtime::Address>) -> Self {
                TransferBuilder(self.0.topic(0, topic))
            }
        });
        assert_quote_contains!(tokens, {
            pub fn memo(self, topic: self::runtime::Topic<self::runtime::H256>) -> Self {
                TransferBuilder(self.0.topic(2, topic))
            }
        });
    }

    #[test]
    fn expand_transfer_filter() {
        let (tokens, _) = expand_json(TRANSFER);

        assert_quote_contains!(tokens, {
            pub fn transfer(&self) -> self::event_builders::TransferBuilder {
                self::event_builders::TransferBuilder(
                    self.instance.event(Some(self::events::Transfer::signature()))
                )
            }
        });
    }

    #[test]
    fn anonymous_events_filter_without_signature() {
        let (tokens, _) = expand_json(
            r#"[{"type":"event","name":"Ping","anonymous":true,"inputs":[]}]"#,
        );

        assert_quote_contains!(tokens, {
            self.instance.event(None)
        });
    }

    #[test]
    fn unnamed_fields_make_tuple_structs() {
        let (tokens, _) = expand_json(
            r#"[{"type":"event","name":"Log","inputs":[
                {"name":"","type":"uint8"},{"name":"","type":"bytes"}]}]"#,
        );

        assert_quote_contains!(tokens, {
            pub struct Log(pub u8, pub ::std::vec::Vec<u8>,);
        });
    }

    #[test]
    fn large_arrays_skip_default() {
        let (tokens, _) = expand_json(
            r#"[{"type":"event","name":"Big","inputs":[{"name":"data","type":"uint8[64]"}]}]"#,
        );

        assert_quote_contains!(tokens, {
            #[derive(Clone, Debug, Eq, PartialEq)]
            pub struct Big
        });
    }

    #[test]
    #[rustfmt::skip]
    fn expand_hash_value() {
        let mut hash = [0u8; 32];
        for (i, byte) in hash.iter_mut().enumerate() {
            *byte = i as u8;
        }
        assert_quote!(expand_hash(hash), {
            self::runtime::H256::from([
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
                16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31
            ])
        });
    }
}
