//! Error types for the ChainTx decode pipeline.
//!
//! Only hard failures live here. A classifier that does not recognise a
//! payload shape is not an error; it simply declines.

use thiserror::Error;

/// Errors that abort the decode of a single transaction.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid value {value:?}: {reason}")]
    InvalidValue { value: String, reason: String },

    #[error("Invalid base64 payload: {reason}")]
    InvalidBase64 { reason: String },

    #[error("Payload is not valid UTF-8: {reason}")]
    InvalidUtf8 { reason: String },

    #[error("Invalid hex in {field}: {reason}")]
    InvalidHex { field: String, reason: String },

    #[error("Invalid text in {field}: {reason}")]
    InvalidText { field: String, reason: String },

    #[error("Invalid address: expected 32 bytes, got {len}")]
    InvalidAddress { len: usize },

    #[error("Invalid address prefix {hrp:?}: {reason}")]
    InvalidHrp { hrp: String, reason: String },

    #[error("Transfer count {declared} exceeds the {available} transfers the arguments can hold")]
    TransferCountOutOfRange { declared: String, available: usize },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors that can occur during batch decoding.
#[derive(Debug, Error)]
pub enum BatchDecodeError {
    #[error("Decode error at index {index}: {source}")]
    ItemFailed {
        index: usize,
        #[source]
        source: DecodeError,
    },
}
