//! The `TransactionDecoder` trait and associated batch types.
//!
//! Every chain-specific decoder implements `TransactionDecoder`. The trait is
//! object-safe so decoders can be stored as `Arc<dyn TransactionDecoder>`.

use crate::error::{BatchDecodeError, DecodeError};
use crate::types::{RawTransaction, TransactionMetadata};

/// Controls how a batch decode reacts to individual decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Silently skip transactions that fail to decode.
    #[default]
    Skip,
    /// Collect decode errors alongside successes and return both at the end.
    Collect,
    /// Abort the entire batch on first error.
    Throw,
}

impl std::str::FromStr for ErrorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "collect" => Ok(Self::Collect),
            "throw" => Ok(Self::Throw),
            other => Err(format!("unknown error mode: {other}")),
        }
    }
}

/// The output of a batch decode: successes plus any collected errors.
#[derive(Debug, Default)]
pub struct BatchDecodeResult {
    /// `(input_index, metadata)` pairs in input order.
    pub decoded: Vec<(usize, TransactionMetadata)>,
    /// Populated only when `ErrorMode::Collect` is used.
    pub errors: Vec<(usize, DecodeError)>,
}

impl BatchDecodeResult {
    /// Fold per-transaction results into a batch result according to `mode`.
    pub fn from_results(
        results: Vec<Result<TransactionMetadata, DecodeError>>,
        mode: ErrorMode,
    ) -> Result<Self, BatchDecodeError> {
        let mut out = Self::default();
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(meta) => out.decoded.push((index, meta)),
                Err(source) => match mode {
                    ErrorMode::Skip => {}
                    ErrorMode::Collect => out.errors.push((index, source)),
                    ErrorMode::Throw => {
                        return Err(BatchDecodeError::ItemFailed { index, source });
                    }
                },
            }
        }
        Ok(out)
    }
}

/// A chain-specific transaction payload decoder.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; decoding is a pure function of the
/// input, so a single decoder can be shared across threads without locking.
pub trait TransactionDecoder: Send + Sync {
    /// Returns the chain family name this decoder handles (e.g. `"multiversx"`).
    fn chain_family(&self) -> &'static str;

    /// Decode a single transaction into its most specific interpretation.
    ///
    /// Unrecognised payloads are never an error: they degrade to a plain
    /// call or value transfer. `Err` is reserved for malformed input.
    fn decode(&self, tx: &RawTransaction) -> Result<TransactionMetadata, DecodeError>;

    /// Convenience: decode from a JSON object `{sender, receiver, value, data}`.
    fn decode_json(&self, json: &str) -> Result<TransactionMetadata, DecodeError> {
        let tx: RawTransaction = serde_json::from_str(json)?;
        self.decode(&tx)
    }

    /// Decode a batch of transactions.
    ///
    /// The default implementation decodes sequentially; chain crates can
    /// override it for parallelism.
    fn decode_batch(
        &self,
        txs: &[RawTransaction],
        mode: ErrorMode,
    ) -> Result<BatchDecodeResult, BatchDecodeError> {
        let results = txs.iter().map(|tx| self.decode(tx)).collect();
        BatchDecodeResult::from_results(results, mode)
    }
}
