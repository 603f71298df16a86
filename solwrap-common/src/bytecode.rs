//! Compiled contract bytecode, handled as opaque text.

/// The text of a compiled contract binary.
///
/// The generator never decodes the bytecode, it only embeds it in the
/// generated wrapper. Surrounding whitespace is stripped and text that is
/// empty after stripping is treated as not provided.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Bytecode(Option<String>);

impl Bytecode {
    /// Bytecode that was not provided.
    pub fn not_provided() -> Self {
        Bytecode(None)
    }

    /// Creates bytecode from its text representation.
    pub fn from_text(text: impl AsRef<str>) -> Self {
        let text = text.as_ref().trim();
        if text.is_empty() {
            Bytecode(None)
        } else {
            Bytecode(Some(text.to_string()))
        }
    }

    /// Creates bytecode from raw file contents, replacing invalid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Bytecode::from_text(String::from_utf8_lossy(bytes))
    }

    /// Returns the bytecode text if it was provided.
    pub fn as_text(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns `true` if no bytecode was provided.
    pub fn is_not_provided(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Option<String>> for Bytecode {
    fn from(text: Option<String>) -> Self {
        text.map(Bytecode::from_text).unwrap_or_default()
    }
}
