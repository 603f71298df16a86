use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::quote;
use solwrap_common::AbiParameter;
use std::collections::HashSet;
use syn::Ident as SynIdent;

/// Expands a identifier string into an token.
pub fn ident(name: &str) -> Ident {
    Ident::new(name, Span::call_site())
}

/// Turns an arbitrary name into a valid Rust identifier: characters that
/// cannot appear in identifiers become `_` and reserved keywords get a
/// trailing `_`.
pub fn safe_name(name: &str) -> String {
    let mut name = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect::<String>();
    if name.is_empty() {
        name.push_str("unnamed");
    }
    if name == "_" || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if syn::parse_str::<SynIdent>(&name).is_err() {
        name.push('_');
    }
    name
}

/// Snake cases a name and makes it a safe identifier. Words are split on
/// lower to upper case transitions and at the end of acronyms; digit runs
/// stay attached to the word they follow, so `web3` and `uint256` are kept.
pub fn snake_name(name: &str) -> String {
    let chars = safe_name(name).chars().collect::<Vec<_>>();
    let mut snake = String::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_uppercase() {
            snake.push(c);
            continue;
        }

        let boundary = match i.checked_sub(1).map(|j| chars[j]) {
            Some(prev) if prev.is_ascii_lowercase() || prev.is_ascii_digit() => true,
            Some(prev) if prev.is_ascii_uppercase() => chars
                .get(i + 1)
                .map_or(false, |next| next.is_ascii_lowercase()),
            _ => false,
        };
        if boundary {
            snake.push('_');
        }
        snake.push(c.to_ascii_lowercase());
    }
    safe_name(&snake)
}

/// Pascal cases a name and makes it a safe identifier, using the same word
/// boundaries as [`snake_name`].
pub fn pascal_name(name: &str) -> String {
    let pascal = snake_name(name)
        .split('_')
        .map(capitalize_first)
        .collect::<String>();
    safe_name(&pascal)
}

/// Expands the names of a parameter list. Unnamed parameters become `p<i>`
/// and names that would repeat after snake casing, or that are `reserved` by
/// the surrounding generated code, get their index appended.
pub fn expand_input_names(inputs: &[AbiParameter], reserved: &[&str]) -> Vec<Ident> {
    let mut seen = reserved
        .iter()
        .map(|name| name.to_string())
        .collect::<HashSet<_>>();
    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let mut name = if input.name.is_empty() {
                format!("p{}", i)
            } else {
                snake_name(&input.name)
            };
            let mut suffix = i;
            let base = name.clone();
            while !seen.insert(name.clone()) {
                name = format!("{}_{}", base, suffix);
                suffix += 1;
            }
            ident(&name)
        })
        .collect()
}

/// Expands a doc string into an attribute token stream.
pub fn expand_doc(s: &str) -> TokenStream {
    let doc = Literal::string(s);
    quote! {
        #[doc = #doc]
    }
}

/// Expands a byte array into a literal array expression.
pub fn expand_bytes(bytes: &[u8]) -> TokenStream {
    let bytes = bytes.iter().copied().map(Literal::u8_unsuffixed);
    quote! { [#( #bytes ),*] }
}

/// Capitalises the first letter of a name, the way contract names are
/// derived from ABI file names.
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_names() {
        for (name, expected) in &[
            ("foo", "foo"),
            ("self", "self_"),
            ("type", "type_"),
            ("$value", "_value"),
            ("_", "__"),
            ("", "unnamed"),
        ] {
            assert_eq!(safe_name(name), *expected);
        }
    }

    #[test]
    fn cased_names() {
        for (name, expected) in &[
            ("balanceOf", "balance_of"),
            ("foo_uint256_address", "foo_uint256_address"),
            ("web3", "web3"),
            ("ERC20Token", "erc20_token"),
            ("getHTTPValue", "get_http_value"),
            ("PingPong", "ping_pong"),
            ("self", "self_"),
        ] {
            assert_eq!(snake_name(name), *expected);
        }
        assert_eq!(pascal_name("transfer"), "Transfer");
        assert_eq!(pascal_name("Transfer_uint256"), "TransferUint256");
        assert_eq!(pascal_name("ERC20Token"), "Erc20Token");
        assert_eq!(pascal_name("Self"), "Self_");
    }

    #[test]
    fn input_names() {
        let param = |name: &str| AbiParameter {
            name: name.into(),
            kind: "uint256".into(),
            ..Default::default()
        };
        let names = expand_input_names(
            &[
                param(""),
                param("amount"),
                param("Amount"),
                param("self"),
                param("web3"),
            ],
            &["web3"],
        )
        .into_iter()
        .map(|ident| ident.to_string())
        .collect::<Vec<_>>();
        assert_eq!(names, ["p0", "amount", "amount_2", "self_", "web3_4"]);
    }

    #[test]
    fn renamed_inputs_stay_unique() {
        let param = |name: &str| AbiParameter {
            name: name.into(),
            kind: "bool".into(),
            ..Default::default()
        };
        let names = expand_input_names(&[param("b_2"), param("b"), param("b")], &[])
            .into_iter()
            .map(|ident| ident.to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, ["b_2", "b", "b_3"]);
    }

    #[test]
    fn capitalize() {
        assert_eq!(capitalize_first("token"), "Token");
        assert_eq!(capitalize_first("ERC20"), "ERC20");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn expand_selector_bytes() {
        assert_quote!(expand_bytes(&[0xa9, 0x05, 0x9c, 0xbb]), { [169, 5, 156, 187] });
    }
}
