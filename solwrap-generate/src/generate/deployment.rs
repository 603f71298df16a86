use crate::artifact::{Member, MemberKind};
use crate::errors::GenerateError;
use crate::generate::{types, Context};
use crate::util;
use proc_macro2::TokenStream;
use quote::quote;
use solwrap_common::StateMutability;

/// Names used by the generated deploy function itself.
const RESERVED: &[&str] = &["web3", "binary"];

/// Expands the deploy operation. It is emitted whether or not a binary was
/// provided; without one it fails at invocation time.
pub(crate) fn expand(cx: &Context) -> Result<(TokenStream, Member), GenerateError> {
    let constructor = cx.abi.constructor();
    let inputs = constructor.map(|c| c.inputs.as_slice()).unwrap_or_default();

    let names = util::expand_input_names(inputs, RESERVED);
    let descriptors = inputs
        .iter()
        .map(|input| types::map_parameter(input, cx.policy, "constructor"))
        .collect::<Result<Vec<_>, _>>()?;
    let type_tokens = descriptors.iter().map(types::expand).collect::<Vec<_>>();

    let payable = constructor
        .map(|c| c.state_mutability == StateMutability::Payable)
        .unwrap_or(false);
    let doc = util::expand_doc(&format!(
        "Builds a deployment of a new `{}` contract{}. Fails with \
         `BinaryNotProvided` if the bindings were generated without the \
         contract binary.",
        cx.contract_name,
        if payable {
            ", the constructor is payable"
        } else {
            ""
        },
    ));

    let tokens = quote! {
        impl Contract {
            #doc
            #[allow(clippy::too_many_arguments)]
            pub fn deploy(
                web3: &self::runtime::DynWeb3 #(, #names: #type_tokens )*
            ) -> Result<
                self::runtime::DynDeployBuilder<Self>,
                self::runtime::errors::DeployError,
            > {
                let binary = BINARY.ok_or(self::runtime::errors::DeployError::BinaryNotProvided)?;
                Ok(self::runtime::DynDeployBuilder::new(
                    web3.clone(),
                    binary,
                    (#( #names, )*),
                ))
            }
        }
    };

    let member = Member {
        identifier: "deploy".to_string(),
        signature: None,
        kind: MemberKind::Deploy {
            binary_provided: !cx.bytecode.is_not_provided(),
        },
        inputs: names
            .iter()
            .map(ToString::to_string)
            .zip(descriptors)
            .collect(),
        outputs: vec![],
    };

    Ok((tokens, member))
}
