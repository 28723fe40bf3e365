//! Composition of decryption and obfuscation for display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::obfuscate::UNAVAILABLE;
use crate::{cipher, obfuscate, PriceCipherTable};

/// Numeric adjustment applied between decryption and obfuscation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceTransform {
    /// Show the decrypted value.
    #[default]
    Identity,
    /// Show half the decrypted value.
    Halve,
    /// Multiply by an arbitrary factor.
    Scale(f64),
}

impl PriceTransform {
    /// Apply the transform and round to a whole unit.
    pub fn apply(&self, value: f64) -> f64 {
        let scaled = match self {
            PriceTransform::Identity => value,
            PriceTransform::Halve => value / 2.0,
            PriceTransform::Scale(factor) => value * factor,
        };
        scaled.round()
    }
}

/// Decrypts transport prices and turns numbers into display codes.
///
/// The secret is optional: without one every decryption yields `0`, which
/// displays as unavailable.
#[derive(Clone)]
pub struct PriceCodec {
    secret: Option<String>,
    table: PriceCipherTable,
}

impl PriceCodec {
    /// Create a codec from a secret and a glyph table.
    pub fn new(secret: Option<String>, table: PriceCipherTable) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
            table,
        }
    }

    /// Create a codec reading the secret from the environment variable `var`.
    pub fn from_env(var: &str, table: PriceCipherTable) -> Self {
        let secret = std::env::var(var).ok();
        if secret.as_deref().map_or(true, str::is_empty) {
            tracing::debug!(var, "price secret not set");
        }
        Self::new(secret, table)
    }

    /// Whether a secret is configured.
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// The glyph table.
    pub fn table(&self) -> &PriceCipherTable {
        &self.table
    }

    /// Decrypt a transport price; `0` when unavailable.
    pub fn decrypt(&self, ciphertext: &str) -> f64 {
        cipher::decrypt(ciphertext, self.secret.as_deref().unwrap_or(""))
    }

    /// Encode a number as a display code.
    pub fn obfuscate(&self, value: Option<f64>) -> String {
        obfuscate::obfuscate(value, &self.table)
    }

    /// Decrypt, transform and encode a transport price.
    ///
    /// A decrypted `0` means the price could not be recovered and is shown as
    /// unavailable rather than as a zero code. [`PriceCodec::display_number`]
    /// has no such rule.
    pub fn display_code(&self, ciphertext: &str, transform: PriceTransform) -> String {
        let value = self.decrypt(ciphertext);
        if value == 0.0 {
            return UNAVAILABLE.to_string();
        }
        self.obfuscate(Some(transform.apply(value)))
    }

    /// Encode a plain number after applying `transform`.
    ///
    /// Only `None` is unavailable. An already decrypted price of `0` is a real
    /// value and encodes as the zero glyph, unlike in
    /// [`PriceCodec::display_code`].
    pub fn display_number(&self, value: Option<f64>, transform: PriceTransform) -> String {
        self.obfuscate(value.map(|v| transform.apply(v)))
    }
}

impl fmt::Debug for PriceCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriceCodec")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("table", &self.table)
            .finish()
    }
}
