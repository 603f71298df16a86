use crate::generate::Context;
use crate::util;
use proc_macro2::{Literal, TokenStream};
use quote::quote;

pub(crate) fn expand(cx: &Context) -> TokenStream {
    let contract_name = &cx.contract_name;
    let name = Literal::string(&contract_name.to_string());
    let doc = util::expand_doc(&format!(
        "Type-safe wrapper around an instance of the `{}` contract.",
        contract_name
    ));
    let binary = match cx.bytecode.as_text() {
        Some(text) => {
            let text = Literal::string(text);
            quote! { Some(#text) }
        }
        None => quote! { None },
    };

    quote! {
        /// The compiled contract binary embedded at generation time, or `None`
        /// if it was not provided. Deployments fail without it.
        pub const BINARY: Option<&str> = #binary;

        #doc
        #[derive(Clone)]
        pub struct Contract {
            instance: self::runtime::DynInstance,
        }

        impl Contract {
            /// Creates a new contract instance with the specified `web3`
            /// provider at the given address.
            pub fn at(web3: &self::runtime::DynWeb3, address: self::runtime::Address) -> Self {
                Contract {
                    instance: self::runtime::DynInstance::at(web3.clone(), address),
                }
            }

            /// Returns the contract address being used by this instance.
            pub fn address(&self) -> self::runtime::Address {
                self.instance.address()
            }

            /// Returns a reference to the underlying untyped contract instance.
            pub fn raw_instance(&self) -> &self::runtime::DynInstance {
                &self.instance
            }
        }

        impl From<self::runtime::DynInstance> for Contract {
            fn from(instance: self::runtime::DynInstance) -> Self {
                Contract { instance }
            }
        }

        impl std::fmt::Debug for Contract {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.debug_tuple(#name)
                    .field(&self.address())
                    .finish()
            }
        }
    }
}
