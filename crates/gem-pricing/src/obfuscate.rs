//! Display obfuscation of price numbers.

use crate::numeric::render_number;
use crate::PriceCipherTable;

/// Code shown when there is no price to display.
pub const UNAVAILABLE: &str = "N/A";

/// Encode a number as a display code through `table`.
///
/// The number is rendered in shortest decimal form and scanned left to right.
/// At each position a run of three zeros wins over a run of two, which wins
/// over a single character. Characters the table does not cover (`.` and `-`)
/// are copied through unchanged. `None`, NaN and infinities encode as
/// [`UNAVAILABLE`].
///
/// There is no decoder.
pub fn obfuscate(value: Option<f64>, table: &PriceCipherTable) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return UNAVAILABLE.to_string();
    };

    let digits = render_number(value);
    let bytes = digits.as_bytes();
    let mut code = String::with_capacity(digits.len() * 2);
    let mut pos = 0;

    while pos < bytes.len() {
        let rest = &bytes[pos..];
        if rest.starts_with(b"000") {
            code.push_str(table.triple_zero());
            pos += 3;
        } else if rest.starts_with(b"00") {
            code.push_str(table.double_zero());
            pos += 2;
        } else {
            let c = rest[0] as char;
            match table.digit(c) {
                Some(glyph) => code.push_str(glyph),
                None => code.push(c),
            }
            pos += 1;
        }
    }

    code
}
