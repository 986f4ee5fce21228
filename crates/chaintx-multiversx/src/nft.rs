//! Decode single NFT / SFT / meta-ESDT transfers.
//!
//! Layout: `ESDTNFTTransfer@<collection>@<nonce>@<value>@<recipient>[@<function>@<args>...]`
//!
//! The built-in is invoked as a call from the sender to itself; the real
//! recipient is the 32-byte public key in the fourth argument.

use chaintx_core::error::DecodeError;
use chaintx_core::types::{
    TokenTransferProperties, TransactionKind, TransactionMetadata, Transfer,
};
use tracing::trace;

use crate::address::{decode_public_key, AddressEncoder};
use crate::call::{nested_call, DecodedCall};
use crate::codec::{hex_to_biguint, hex_to_string};

/// Built-in function name of a single non-fungible transfer.
pub const ESDT_NFT_TRANSFER: &str = "ESDTNFTTransfer";

/// Try to interpret `call` as an `ESDTNFTTransfer`.
///
/// Returns `Ok(None)` unless the call is self-directed, names the NFT
/// transfer built-in, has at least four arguments and the fourth one is a
/// 32-byte public key.
pub fn decode_nft_transfer(
    call: &DecodedCall,
    addresses: &AddressEncoder,
) -> Result<Option<TransactionMetadata>, DecodeError> {
    if !call.is_self_directed() || !call.is_function(ESDT_NFT_TRANSFER) {
        return Ok(None);
    }
    let args = call.args();
    if args.len() < 4 {
        trace!(args = args.len(), "ESDTNFTTransfer with too few arguments");
        return Ok(None);
    }
    let Some(recipient) = decode_public_key(&args[3]) else {
        trace!("ESDTNFTTransfer recipient is not a 32-byte public key");
        return Ok(None);
    };

    let collection = hex_to_string("collection identifier", &args[0])?;
    let nonce = &args[1];
    let value = hex_to_biguint("transfer value", &args[2])?;
    let receiver = addresses.encode(&recipient)?;
    let (function_name, function_args) = nested_call(&args[4..])?;

    Ok(Some(TransactionMetadata {
        sender: call.sender.clone(),
        receiver,
        value: value.clone(),
        kind: TransactionKind::NftTransfer,
        function_name,
        function_args,
        transfers: Some(vec![Transfer::new(
            value,
            TokenTransferProperties::non_fungible(collection, nonce),
        )]),
    }))
}
