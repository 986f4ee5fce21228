//! `MultiversxDecoder`: the `TransactionDecoder` implementation for MultiversX.

use chaintx_core::{
    decoder::{BatchDecodeResult, ErrorMode, TransactionDecoder},
    error::{BatchDecodeError, DecodeError},
    types::{RawTransaction, TransactionMetadata},
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::address::{AddressEncoder, DEFAULT_HRP};
use crate::call::DecodedCall;
use crate::esdt::decode_esdt_transfer;
use crate::multi::decode_multi_transfer;
use crate::nft::decode_nft_transfer;

/// A transfer classifier: accepts a parsed call or declines with `Ok(None)`.
pub type Classifier =
    fn(&DecodedCall, &AddressEncoder) -> Result<Option<TransactionMetadata>, DecodeError>;

/// Classifiers in the order they are tried. The first to accept wins.
pub const CLASSIFIERS: [(&str, Classifier); 3] = [
    ("esdt", decode_esdt_transfer),
    ("nft", decode_nft_transfer),
    ("multi", decode_multi_transfer),
];

/// Decoder settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Bech32 human-readable prefix used for recipients rewritten from call
    /// arguments.
    #[serde(default = "default_hrp")]
    pub address_hrp: String,
}

fn default_hrp() -> String {
    DEFAULT_HRP.to_string()
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            address_hrp: default_hrp(),
        }
    }
}

/// The MultiversX transaction decoder.
/// Holds only immutable configuration and is safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct MultiversxDecoder {
    addresses: AddressEncoder,
}

impl MultiversxDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a decoder from `config`. Fails with `DecodeError::InvalidHrp`
    /// if the address prefix cannot form a bech32 address.
    pub fn with_config(config: &DecoderConfig) -> Result<Self, DecodeError> {
        Ok(Self {
            addresses: AddressEncoder::new(config.address_hrp.clone())?,
        })
    }

    pub fn address_encoder(&self) -> &AddressEncoder {
        &self.addresses
    }

    /// Run the classifier chain over an already parsed call.
    pub fn classify(&self, call: DecodedCall) -> Result<TransactionMetadata, DecodeError> {
        for (name, classifier) in CLASSIFIERS {
            if let Some(meta) = classifier(&call, &self.addresses)? {
                debug!(
                    classifier = name,
                    kind = %meta.kind,
                    transfers = meta.transfers().len(),
                    "payload classified"
                );
                return Ok(meta);
            }
        }
        trace!(function = ?call.function_name, "no transfer classifier matched");
        Ok(call.into_metadata())
    }
}

impl TransactionDecoder for MultiversxDecoder {
    fn chain_family(&self) -> &'static str {
        "multiversx"
    }

    fn decode(&self, tx: &RawTransaction) -> Result<TransactionMetadata, DecodeError> {
        let call = DecodedCall::parse(tx)?;
        self.classify(call)
    }

    fn decode_batch(
        &self,
        txs: &[RawTransaction],
        mode: ErrorMode,
    ) -> Result<BatchDecodeResult, BatchDecodeError> {
        let results: Vec<Result<TransactionMetadata, DecodeError>> =
            txs.par_iter().map(|tx| self.decode(tx)).collect();
        BatchDecodeResult::from_results(results, mode)
    }
}
