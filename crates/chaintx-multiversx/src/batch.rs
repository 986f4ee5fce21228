//! Rayon-powered batch decode helpers.
//! `MultiversxDecoder::decode_batch` covers the `ErrorMode`-driven path; these
//! return raw `(successes, errors)` splits for callers that want to stream
//! large inputs chunk by chunk.

use chaintx_core::{
    decoder::TransactionDecoder,
    error::DecodeError,
    types::{RawTransaction, TransactionMetadata},
};
use rayon::prelude::*;
use tracing::info;

use crate::decoder::MultiversxDecoder;

/// Decode a slice of transactions in parallel using Rayon.
/// Returns `(successes, errors)`, both keyed by their index in `txs`.
pub fn parallel_decode(
    decoder: &MultiversxDecoder,
    txs: &[RawTransaction],
) -> (Vec<(usize, TransactionMetadata)>, Vec<(usize, DecodeError)>) {
    let results: Vec<(usize, Result<TransactionMetadata, DecodeError>)> = txs
        .par_iter()
        .enumerate()
        .map(|(idx, tx)| (idx, decoder.decode(tx)))
        .collect();

    let mut decoded = Vec::with_capacity(txs.len());
    let mut errors = Vec::new();
    for (idx, r) in results {
        match r {
            Ok(meta) => decoded.push((idx, meta)),
            Err(e) => errors.push((idx, e)),
        }
    }
    (decoded, errors)
}

/// Chunk `txs` into slices of at most `chunk_size` and decode each chunk
/// in parallel. Returns a flat list of successes and errors keyed by their
/// index in `txs`.
pub fn chunked_decode(
    decoder: &MultiversxDecoder,
    txs: &[RawTransaction],
    chunk_size: usize,
) -> (Vec<(usize, TransactionMetadata)>, Vec<(usize, DecodeError)>) {
    let chunk_size = chunk_size.max(1);
    let mut all_decoded = Vec::with_capacity(txs.len());
    let mut all_errors = Vec::new();
    let mut offset = 0;

    for chunk in txs.chunks(chunk_size) {
        let (decoded, errs) = parallel_decode(decoder, chunk);
        // indices are chunk-relative
        all_decoded.extend(decoded.into_iter().map(|(idx, meta)| (offset + idx, meta)));
        all_errors.extend(errs.into_iter().map(|(idx, err)| (offset + idx, err)));
        offset += chunk.len();
    }

    info!(
        total = txs.len(),
        decoded = all_decoded.len(),
        failed = all_errors.len(),
        chunk_size,
        "chunked decode finished"
    );
    (all_decoded, all_errors)
}
