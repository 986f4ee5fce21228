//! Decode single fungible token transfers.
//!
//! Layout: `ESDTTransfer@<token>@<value>[@<function>@<args>...]`
//!
//! The call is addressed to the token recipient (or to the contract being
//! paid), so the envelope receiver is kept as-is.

use chaintx_core::error::DecodeError;
use chaintx_core::types::{
    TokenTransferProperties, TransactionKind, TransactionMetadata, Transfer,
};

use crate::address::AddressEncoder;
use crate::call::{nested_call, DecodedCall};
use crate::codec::{hex_to_biguint, hex_to_string};

/// Built-in function name of a fungible token transfer.
pub const ESDT_TRANSFER: &str = "ESDTTransfer";

/// Try to interpret `call` as an `ESDTTransfer`.
///
/// Returns `Ok(None)` if the function name or argument count does not match.
/// The receiver is taken from the envelope, so no address is encoded.
pub fn decode_esdt_transfer(
    call: &DecodedCall,
    _addresses: &AddressEncoder,
) -> Result<Option<TransactionMetadata>, DecodeError> {
    if !call.is_function(ESDT_TRANSFER) {
        return Ok(None);
    }
    let args = call.args();
    if args.len() < 2 {
        return Ok(None);
    }

    let token = hex_to_string("token identifier", &args[0])?;
    let value = hex_to_biguint("transfer value", &args[1])?;
    let (function_name, function_args) = nested_call(&args[2..])?;

    Ok(Some(TransactionMetadata {
        sender: call.sender.clone(),
        receiver: call.receiver.clone(),
        value: value.clone(),
        kind: TransactionKind::EsdtTransfer,
        function_name,
        function_args,
        transfers: Some(vec![Transfer::new(
            value,
            TokenTransferProperties::fungible(token),
        )]),
    }))
}
