//! # chaintx-multiversx
//!
//! MultiversX transaction payload decoder implementing the
//! `TransactionDecoder` trait.
//!
//! A transaction's base64 `data` field is split into `function@arg@arg...`
//! and handed to three transfer classifiers, tried in order:
//! - `ESDTTransfer`: single fungible token
//! - `ESDTNFTTransfer`: single NFT / SFT / meta-ESDT, recipient in the args
//! - `MultiESDTNFTTransfer`: several tokens to one recipient
//!
//! A payload none of them accepts is reported as a plain contract call, or as
//! a value transfer when the payload is not call-shaped at all.
//!
//! ## Quick start
//! ```
//! use chaintx_core::{RawTransaction, TransactionDecoder};
//! use chaintx_multiversx::MultiversxDecoder;
//!
//! let tx = RawTransaction::new(
//!     "erd1sender",
//!     "erd1receiver",
//!     "0",
//!     "RVNEVFRyYW5zZmVyQDU0NDU1MzU0MmQzMjY1MzQzMDY0MzdAMDI1NDBiZTQwMA==",
//! );
//! let meta = MultiversxDecoder::new().decode(&tx).unwrap();
//! assert_eq!(meta.value.to_string(), "10000000000");
//! assert_eq!(meta.transfers()[0].identifier(), Some("TEST-2e40d7"));
//! ```

pub mod address;
pub mod batch;
pub mod call;
pub mod codec;
pub mod decoder;
pub mod esdt;
pub mod multi;
pub mod nft;

pub use address::AddressEncoder;
pub use call::DecodedCall;
pub use decoder::{DecoderConfig, MultiversxDecoder};
