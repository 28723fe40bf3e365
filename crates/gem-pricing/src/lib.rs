//! Price codec for the gem catalog.
//!
//! Two independent layers:
//!
//! - **Transport**: prices arrive AES-encrypted under a deployment secret.
//!   [`decrypt`] turns them into numbers and never fails; problems yield `0`.
//! - **Display**: [`obfuscate`] turns a number into a code through an
//!   injected [`PriceCipherTable`] so literal digits are never shown.
//!
//! [`PriceCodec`] bundles a secret and a table and composes the two.
//!
//! # Example
//!
//! ```rust,ignore
//! use gem_pricing::{PriceCipherTable, PriceCodec, PriceTransform};
//!
//! let table = PriceCipherTable::load("cipher-table.toml")?;
//! let codec = PriceCodec::from_env("GEMS_PRICE_SECRET", table);
//! let code = codec.display_code(&stone_price_ciphertext, PriceTransform::Halve);
//! ```

mod cipher;
mod codec;
mod error;
mod numeric;
mod obfuscate;
mod table;

pub use cipher::{decrypt, seal, seal_random, try_decrypt};
pub use codec::{PriceCodec, PriceTransform};
pub use error::CodecError;
pub use numeric::{parse_leading_float, render_number};
pub use obfuscate::{obfuscate, UNAVAILABLE};
pub use table::{PriceCipherTable, SYMBOLS};
