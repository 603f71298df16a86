#![deny(missing_docs, unsafe_code)]

//! Crate for generating type-safe Rust wrappers for smart contracts from
//! their ABI. This crate is intended to be used either from a build script or
//! through the `solwrap` command line tool.

#[cfg(test)]
#[allow(missing_docs)]
#[macro_use]
#[path = "test/macros.rs"]
mod test_macros;

pub mod driver;

mod artifact;
mod errors;
mod generate;
mod rustfmt;
mod util;

pub use crate::artifact::{ContractArtifact, Member, MemberKind};
pub use crate::driver::{Driver, FileSystem, GenerationJob, InputSource, SourceWriter};
pub use crate::errors::{GenerateError, GenerationFailure};
pub use crate::generate::resolve::{overload_suffix, ResolvedSignature};
pub use crate::generate::types::{IntegerRepr, TypeDescriptor, TypePolicy};

/// Convenience re-imports so that you don't have to add `solwrap-common` as a
/// dependency.
pub mod abi {
    pub use solwrap_common::{
        Abi, AbiEntry, AbiLoader, AbiParameter, Bytecode, EntryKind, ParamType, StateMutability,
    };
}

use solwrap_common::{Abi, Bytecode};

/// Builder for generating contract code. Note that no code is generated until
/// the builder is finalized with `generate`.
pub struct ContractBuilder {
    /// The runtime crate name that generated code refers to.
    pub runtime_crate_name: String,

    /// The visibility modifier to use for the generated module and contract
    /// re-export.
    pub visibility_modifier: Option<String>,

    /// Override the contract module name that contains the generated code.
    pub contract_mod_override: Option<String>,

    /// Override the contract name to use for the generated type.
    pub contract_name_override: Option<String>,

    /// The namespace the contract is generated for. It decides the output
    /// directory of the generated file.
    pub namespace: String,

    /// How integer types are mapped.
    pub type_policy: TypePolicy,

    /// Manually specified contract method aliases, as signature and alias
    /// pairs.
    pub method_aliases: Vec<(String, String)>,

    /// Derives added to event structs.
    pub event_derives: Vec<String>,

    /// Format generated code using locally installed copy of `rustfmt`.
    pub rustfmt: bool,
}

impl ContractBuilder {
    /// Creates a new contract builder with default settings.
    pub fn new() -> Self {
        ContractBuilder {
            runtime_crate_name: "solwrap_runtime".to_string(),
            visibility_modifier: None,
            contract_mod_override: None,
            contract_name_override: None,
            namespace: String::new(),
            type_policy: TypePolicy::default(),
            method_aliases: vec![],
            event_derives: vec![],
            rustfmt: true,
        }
    }

    /// Sets the crate name for the runtime crate. This setting is usually only
    /// needed if the crate was renamed in the Cargo manifest.
    pub fn runtime_crate_name(mut self, name: impl Into<String>) -> Self {
        self.runtime_crate_name = name.into();
        self
    }

    /// Sets an optional visibility modifier for the generated module and
    /// contract re-export.
    pub fn visibility_modifier(mut self, vis: impl Into<String>) -> Self {
        self.visibility_modifier = Some(vis.into());
        self
    }

    /// Sets the optional contract module name override.
    pub fn contract_mod_override(mut self, name: impl Into<String>) -> Self {
        self.contract_mod_override = Some(name.into());
        self
    }

    /// Sets the optional contract name override.
    pub fn contract_name_override(mut self, name: impl Into<String>) -> Self {
        self.contract_name_override = Some(name.into());
        self
    }

    /// Sets the namespace, a `.` or `::` separated path.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the integer mapping policy.
    pub fn type_policy(mut self, policy: TypePolicy) -> Self {
        self.type_policy = policy;
        self
    }

    /// Adds a method alias to specify what the method name will be in Rust.
    /// For methods without an alias, the snake cased method name will be used,
    /// with a type suffix for overloads.
    pub fn add_method_alias(
        mut self,
        signature: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        self.method_aliases.push((signature.into(), alias.into()));
        self
    }

    /// Adds a custom derive to the derives for event structs.
    ///
    /// # Examples
    ///
    /// ```
    /// # use solwrap_generate::ContractBuilder;
    /// let builder = ContractBuilder::new()
    ///     .add_event_derive("serde::Serialize")
    ///     .add_event_derive("serde::Deserialize");
    /// ```
    pub fn add_event_derive(mut self, derive: impl Into<String>) -> Self {
        self.event_derives.push(derive.into());
        self
    }

    /// Specifies whether or not to format the code using a locally installed
    /// copy of `rustfmt`.
    ///
    /// Note that in case `rustfmt` does not exist or produces an error, the
    /// unformatted code will be used.
    pub fn rustfmt(mut self, rustfmt: bool) -> Self {
        self.rustfmt = rustfmt;
        self
    }

    /// Generates the contract wrapper for the given contract name, ABI and
    /// bytecode. Either the whole wrapper is produced or an error is returned.
    pub fn generate(
        self,
        name: &str,
        abi: &Abi,
        bytecode: &Bytecode,
    ) -> Result<ContractArtifact, GenerateError> {
        generate::expand(name, abi, bytecode, self)
    }
}

impl Default for ContractBuilder {
    fn default() -> Self {
        ContractBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solwrap_common::AbiLoader;

    const TOKEN: &str = r#"[
        {"type":"constructor","inputs":[{"name":"supply","type":"uint256"}],"stateMutability":"nonpayable"},
        {"type":"function","name":"balanceOf","inputs":[{"name":"owner","type":"address"}],
         "outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
        {"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"value","type":"uint256"}],
         "outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
        {"type":"event","name":"Transfer","inputs":[{"name":"from","type":"address","indexed":true},
         {"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]}
    ]"#;

    fn token_abi() -> Abi {
        AbiLoader::new().load_from_str(TOKEN).unwrap()
    }

    #[test]
    fn generate_token_members() {
        let artifact = ContractBuilder::new()
            .rustfmt(false)
            .generate("Token", &token_abi(), &Bytecode::from_text("0x6080"))
            .unwrap();

        assert_eq!(artifact.contract_name(), "Token");
        assert_eq!(artifact.module_name(), "token");
        assert_eq!(artifact.bytecode(), Some("0x6080"));
        let identifiers = artifact
            .members()
            .iter()
            .map(|member| member.qualified_identifier())
            .collect::<Vec<_>>();
        assert_eq!(
            identifiers,
            [
                "Contract::deploy",
                "Methods::balance_of",
                "Methods::transfer",
                "events::Transfer",
            ],
        );
    }

    #[test]
    fn generate_reexports_contract() {
        let artifact = ContractBuilder::new()
            .visibility_modifier("pub")
            .rustfmt(false)
            .generate("Token", &token_abi(), &Bytecode::not_provided())
            .unwrap();

        assert_quote_contains!(artifact.tokens(), {
            pub use self::token::Contract as Token;
        });
        assert_quote_contains!(artifact.tokens(), {
            pub const BINARY: Option<&str> = None;
        });
    }

    #[test]
    fn generate_relative_path_from_namespace() {
        let artifact = ContractBuilder::new()
            .namespace("org.example.tokens")
            .rustfmt(false)
            .generate("MyToken", &token_abi(), &Bytecode::not_provided())
            .unwrap();

        assert_eq!(
            artifact.relative_path(),
            std::path::Path::new("org/example/tokens/my_token.rs"),
        );
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let err = ContractBuilder::new()
            .runtime_crate_name("not a crate")
            .generate("Token", &token_abi(), &Bytecode::not_provided())
            .unwrap_err();
        assert!(matches!(err, GenerateError::Config(_)));

        let err = ContractBuilder::new()
            .add_method_alias("transfer(address,uint256)", "send")
            .add_method_alias("transfer(address,uint256)", "move_to")
            .generate("Token", &token_abi(), &Bytecode::not_provided())
            .unwrap_err();
        assert!(matches!(err, GenerateError::Config(_)));
    }

    #[test]
    fn raw_identifiers_are_rejected() {
        let err = ContractBuilder::new()
            .add_method_alias("transfer(address,uint256)", "r#type")
            .generate("Token", &token_abi(), &Bytecode::not_provided())
            .unwrap_err();
        assert!(matches!(err, GenerateError::Config(_)));

        let err = ContractBuilder::new()
            .contract_mod_override("r#mod")
            .generate("Token", &token_abi(), &Bytecode::not_provided())
            .unwrap_err();
        assert!(matches!(err, GenerateError::Config(_)));
    }

    #[test]
    fn method_alias_renames_function() {
        let artifact = ContractBuilder::new()
            .add_method_alias("transfer(address,uint256)", "send")
            .rustfmt(false)
            .generate("Token", &token_abi(), &Bytecode::not_provided())
            .unwrap();

        assert!(artifact
            .members()
            .iter()
            .any(|member| member.identifier == "send"));
    }

    #[test]
    fn event_derives_are_appended() {
        let artifact = ContractBuilder::new()
            .add_event_derive("serde::Serialize")
            .rustfmt(false)
            .generate("Token", &token_abi(), &Bytecode::not_provided())
            .unwrap();

        assert_quote_contains!(artifact.tokens(), {
            #[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
        });
    }
}
