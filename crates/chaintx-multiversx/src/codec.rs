//! Leaf codecs for MultiversX payloads: base64, hex arguments and big-endian
//! integers.
//!
//! A smart-contract argument is hex text matching `[0-9a-fA-F]*` with an even
//! number of characters. The empty string is a valid argument (an omitted
//! trailing argument encodes as nothing between the last `@` and the end).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chaintx_core::error::DecodeError;
use num_bigint::BigUint;

/// Returns `true` if `arg` is well-formed call-argument hex.
pub fn is_smart_contract_argument(arg: &str) -> bool {
    arg.len() % 2 == 0 && arg.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Decode a base64 payload into UTF-8 text.
pub fn base64_to_string(data: &str) -> Result<String, DecodeError> {
    let bytes = STANDARD
        .decode(data.trim())
        .map_err(|e| DecodeError::InvalidBase64 {
            reason: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8 {
        reason: e.to_string(),
    })
}

/// Parse a native value given as a decimal string.
pub fn parse_decimal(value: &str) -> Result<BigUint, DecodeError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::InvalidValue {
            value: value.to_string(),
            reason: "expected an unsigned decimal integer".into(),
        });
    }
    BigUint::parse_bytes(value.as_bytes(), 10).ok_or_else(|| DecodeError::InvalidValue {
        value: value.to_string(),
        reason: "expected an unsigned decimal integer".into(),
    })
}

/// Raw bytes of a hex argument.
pub fn hex_to_bytes(field: &str, hex_str: &str) -> Result<Vec<u8>, DecodeError> {
    hex::decode(hex_str).map_err(|e| DecodeError::InvalidHex {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

/// Decode a hex argument holding ASCII text (token tickers, function names).
pub fn hex_to_string(field: &str, hex_str: &str) -> Result<String, DecodeError> {
    let bytes = hex_to_bytes(field, hex_str)?;
    if !bytes.is_ascii() {
        return Err(DecodeError::InvalidText {
            field: field.to_string(),
            reason: format!("non-ASCII bytes in {hex_str:?}"),
        });
    }
    String::from_utf8(bytes).map_err(|e| DecodeError::InvalidText {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

/// Decode a big-endian unsigned integer. Empty hex is zero.
pub fn hex_to_biguint(field: &str, hex_str: &str) -> Result<BigUint, DecodeError> {
    if hex_str.is_empty() {
        return Ok(BigUint::default());
    }
    let bytes = hex_to_bytes(field, hex_str)?;
    Ok(BigUint::from_bytes_be(&bytes))
}

/// Returns `true` if a nonce argument denotes a fungible token (empty or all zeros).
pub fn is_zero_nonce(nonce: &str) -> bool {
    nonce.bytes().all(|b| b == b'0')
}
