//! Bech32 address encoding for 32-byte MultiversX public keys.

use bech32::{ToBase32, Variant};
use chaintx_core::error::DecodeError;

/// Human-readable prefix of MultiversX mainnet addresses.
pub const DEFAULT_HRP: &str = "erd";

/// Length of an account public key in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Encodes raw public keys as checksummed bech32 address strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressEncoder {
    hrp: String,
}

impl AddressEncoder {
    /// Build an encoder for `hrp`. The prefix is checked once here with a
    /// dry-run encode, so `encode` only fails on a wrong key length.
    pub fn new(hrp: impl Into<String>) -> Result<Self, DecodeError> {
        let hrp = hrp.into();
        bech32::encode(&hrp, [0u8; PUBLIC_KEY_LEN].to_base32(), Variant::Bech32).map_err(
            |e| DecodeError::InvalidHrp {
                hrp: hrp.clone(),
                reason: e.to_string(),
            },
        )?;
        Ok(Self { hrp })
    }

    pub fn hrp(&self) -> &str {
        &self.hrp
    }

    /// Encode exactly 32 bytes as a bech32 address.
    pub fn encode(&self, public_key: &[u8]) -> Result<String, DecodeError> {
        if public_key.len() != PUBLIC_KEY_LEN {
            return Err(DecodeError::InvalidAddress {
                len: public_key.len(),
            });
        }
        bech32::encode(&self.hrp, public_key.to_base32(), Variant::Bech32)
            .map_err(|e| DecodeError::Other(format!("bech32 encode failed: {e}")))
    }
}

impl Default for AddressEncoder {
    fn default() -> Self {
        Self {
            hrp: DEFAULT_HRP.to_string(),
        }
    }
}

/// Decode a hex argument as a public key. Returns `None` unless it holds
/// exactly 32 bytes.
pub fn decode_public_key(hex_str: &str) -> Option<Vec<u8>> {
    hex::decode(hex_str)
        .ok()
        .filter(|bytes| bytes.len() == PUBLIC_KEY_LEN)
}
