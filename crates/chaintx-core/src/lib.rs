//! chaintx-core: foundation types and traits for the ChainTx library.
//!
//! This crate defines:
//! - [`RawTransaction`]: the transaction envelope to decode
//! - [`TransactionMetadata`]: the output of a successful decode
//! - [`TransactionKind`]: how a transaction was classified
//! - [`TransactionDecoder`]: the decoder trait every chain implements
//! - [`DecodeError`]: hard decode failures

pub mod decoder;
pub mod error;
pub mod types;

pub use decoder::{BatchDecodeResult, ErrorMode, TransactionDecoder};
pub use error::{BatchDecodeError, DecodeError};
pub use types::{
    RawTransaction, TokenTransferProperties, TransactionKind, TransactionMetadata, Transfer,
};
