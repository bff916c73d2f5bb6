//! # Input Codec
//!
//! Turns operator tokens into numbers and numbers into wire values.
//!
//! ## Token Syntax
//!
//! | Form | Base | Example |
//! |------|------|---------|
//! | `b<digits>` | 2 | `b1010` → 10 |
//! | `0x<digits>` / `0X<digits>` | 16 | `0xFF` → 255 |
//! | `<digits>` | 10 | `42` → 42 |
//!
//! The binary prefix is lowercase `b` only. Malformed tokens are always an
//! error; no partial or default value is produced.

use tracing::debug;

use crate::bytes::Endianness;
use crate::error::{RegviewError, RegviewResult};

// ============================================================================
// Parsing
// ============================================================================

/// Parse a numeric token in binary, hex or decimal form.
///
/// No range is enforced here; callers narrow the result to the width they need.
///
/// # Example
///
/// ```rust
/// use modbus_regview::parse_value;
///
/// assert_eq!(parse_value("b1010").unwrap(), 10);
/// assert_eq!(parse_value("0xFF").unwrap(), 255);
/// assert_eq!(parse_value("42").unwrap(), 42);
/// assert!(parse_value("0xZZ").is_err());
/// ```
pub fn parse_value(token: &str) -> RegviewResult<i64> {
    let token = token.trim();

    let (digits, radix) = if let Some(rest) = token.strip_prefix('b') {
        (rest, 2)
    } else if let Some(rest) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        (rest, 16)
    } else {
        (token, 10)
    };

    // from_str_radix accepts a leading '+', which is not part of the token syntax
    if digits.is_empty() || (radix != 10 && digits.starts_with(['+', '-'])) {
        return Err(RegviewError::invalid_input(format!(
            "'{}' is not a number",
            token
        )));
    }

    i64::from_str_radix(digits, radix)
        .map_err(|e| RegviewError::invalid_input(format!("'{}' is not a number: {}", token, e)))
}

/// Parse a token and require it to fit a 16-bit address.
pub fn parse_address(token: &str) -> RegviewResult<u16> {
    let value = parse_value(token)?;
    u16::try_from(value).map_err(|_| {
        RegviewError::invalid_input(format!(
            "address {} is outside 0..=65535",
            value
        ))
    })
}

/// Parse a token and require a quantity of at least one.
pub fn parse_quantity(token: &str) -> RegviewResult<u16> {
    let value = parse_value(token)?;
    match u16::try_from(value) {
        Ok(quantity) if quantity >= 1 => Ok(quantity),
        _ => Err(RegviewError::invalid_input(format!(
            "quantity {} is outside 1..=65535",
            value
        ))),
    }
}

/// Parse every whitespace-separated token of `args`.
pub fn parse_values(args: &[&str]) -> RegviewResult<Vec<i64>> {
    args.iter().map(|token| parse_value(token)).collect()
}

// ============================================================================
// Encoding for writes
// ============================================================================

/// Coerce values to coil states: nonzero is `true`.
pub fn encode_coil_values(values: &[i64]) -> Vec<bool> {
    values.iter().map(|&v| v != 0).collect()
}

/// Narrow values to register words and apply the session byte order.
///
/// Values are taken in display form; the result is wire form.
pub fn encode_register_values(values: &[i64], endianness: Endianness) -> RegviewResult<Vec<u16>> {
    let words = values
        .iter()
        .map(|&v| {
            u16::try_from(v).map_err(|_| {
                RegviewError::invalid_input(format!(
                    "register value {} is outside 0..=65535",
                    v
                ))
            })
        })
        .collect::<RegviewResult<Vec<u16>>>()?;

    let encoded = endianness.convert_all(&words);
    debug!(
        "Encoded {} register value(s) with {} byte order",
        encoded.len(),
        endianness
    );
    Ok(encoded)
}

// ============================================================================
// Tests
// ============================================================================
