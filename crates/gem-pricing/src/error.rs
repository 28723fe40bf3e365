//! Price codec errors.

use thiserror::Error;

/// Errors produced while decrypting or encoding a price.
///
/// Callers that only need a display value use [`crate::decrypt`], which maps
/// every one of these to `0`. The typed variants exist so failures can be
/// logged and tested.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Secret or ciphertext was empty.
    #[error("missing {0}")]
    Missing(&'static str),

    /// Ciphertext is not valid base64.
    #[error("ciphertext is not base64: {0}")]
    InvalidBase64(String),

    /// Ciphertext lacks the `Salted__` header.
    #[error("ciphertext has no salt header")]
    MissingSaltHeader,

    /// Ciphertext body is empty or not a whole number of blocks.
    #[error("ciphertext body has invalid length {0}")]
    InvalidLength(usize),

    /// Padding check failed after decryption (usually a wrong secret).
    #[error("decryption failed: bad padding")]
    BadPadding,

    /// Plaintext is not UTF-8.
    #[error("plaintext is not valid UTF-8")]
    InvalidUtf8,

    /// Plaintext does not start with a finite number.
    #[error("plaintext is not a number")]
    NotANumber,

    /// Cipher table is missing a required symbol.
    #[error("cipher table is missing symbol {0:?}")]
    MissingSymbol(String),

    /// Cipher table maps a symbol to an empty glyph.
    #[error("cipher table has an empty glyph for symbol {0:?}")]
    EmptyGlyph(String),

    /// Cipher table contains a key that is not a known symbol.
    #[error("cipher table has unknown symbol {0:?}")]
    UnknownSymbol(String),

    /// Cipher table file could not be read or parsed.
    #[error("cipher table error: {0}")]
    Table(String),
}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        CodecError::Table(e.to_string())
    }
}

impl From<toml::de::Error> for CodecError {
    fn from(e: toml::de::Error) -> Self {
        CodecError::Table(e.to_string())
    }
}
