//! Decode batched multi-token transfers.
//!
//! Layout:
//! `MultiESDTNFTTransfer@<recipient>@<count>@(<token>@<nonce>@<value>){count}[@<function>@<args>...]`
//!
//! Like the NFT built-in, the call is self-directed and the recipient travels
//! as the first argument. A leg with an empty or all-zero nonce moves a
//! fungible token.

use chaintx_core::error::DecodeError;
use chaintx_core::types::{
    TokenTransferProperties, TransactionKind, TransactionMetadata, Transfer,
};
use num_bigint::BigUint;
use tracing::trace;

use crate::address::{decode_public_key, AddressEncoder};
use crate::call::{nested_call, DecodedCall};
use crate::codec::{hex_to_biguint, hex_to_string, is_zero_nonce};

/// Built-in function name of a multi-token transfer.
pub const MULTI_ESDT_NFT_TRANSFER: &str = "MultiESDTNFTTransfer";

/// Arguments consumed by a single leg: token, nonce, value.
const ARGS_PER_TRANSFER: usize = 3;

/// Try to interpret `call` as a `MultiESDTNFTTransfer`.
///
/// The declared count is checked against what the arguments can hold before
/// any leg is read, so a forged count never drives allocation.
pub fn decode_multi_transfer(
    call: &DecodedCall,
    addresses: &AddressEncoder,
) -> Result<Option<TransactionMetadata>, DecodeError> {
    if !call.is_self_directed() || !call.is_function(MULTI_ESDT_NFT_TRANSFER) {
        return Ok(None);
    }
    let args = call.args();
    if args.len() < 3 {
        trace!(args = args.len(), "MultiESDTNFTTransfer with too few arguments");
        return Ok(None);
    }
    let Some(recipient) = decode_public_key(&args[0]) else {
        trace!("MultiESDTNFTTransfer recipient is not a 32-byte public key");
        return Ok(None);
    };

    let count = transfer_count(&args[1], args.len())?;
    let receiver = addresses.encode(&recipient)?;

    let legs_end = 2 + count * ARGS_PER_TRANSFER;
    let transfers = args[2..legs_end]
        .chunks_exact(ARGS_PER_TRANSFER)
        .map(|leg| decode_leg(&leg[0], &leg[1], &leg[2]))
        .collect::<Result<Vec<_>, _>>()?;

    let (function_name, function_args) = nested_call(&args[legs_end..])?;

    Ok(Some(TransactionMetadata {
        sender: call.sender.clone(),
        receiver,
        value: BigUint::default(),
        kind: TransactionKind::MultiTransfer,
        function_name,
        function_args,
        transfers: Some(transfers),
    }))
}

/// Parse the declared count and bound it by the legs `arg_count` arguments can hold.
fn transfer_count(raw: &str, arg_count: usize) -> Result<usize, DecodeError> {
    if raw.is_empty() {
        return Err(DecodeError::InvalidHex {
            field: "transfer count".into(),
            reason: "empty".into(),
        });
    }
    let declared = hex_to_biguint("transfer count", raw)?;
    let available = (arg_count - 2) / ARGS_PER_TRANSFER;
    if declared > BigUint::from(available) {
        return Err(DecodeError::TransferCountOutOfRange {
            declared: raw.to_string(),
            available,
        });
    }
    // declared <= available, so it fits in a usize
    Ok(usize::try_from(&declared).unwrap_or(available))
}

fn decode_leg(token: &str, nonce: &str, value: &str) -> Result<Transfer, DecodeError> {
    let id = hex_to_string("token identifier", token)?;
    let value = hex_to_biguint("transfer value", value)?;
    let properties = if is_zero_nonce(nonce) {
        TokenTransferProperties::fungible(id)
    } else {
        TokenTransferProperties::non_fungible(id, nonce)
    };
    Ok(Transfer::new(value, properties))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nft::decode_nft_transfer;

    const SENDER: &str = "erd1lkrrrn3ws9sp854kdpzer9f77eglqpeet3e3k3uxvqxw9p3eq6xqxj43r9";
    const CONTRACT_HEX: &str = "00000000000000000500df3bebe1afa10c40925e833c14a460e10a849f50a468";
    const CONTRACT: &str = "erd1qqqqqqqqqqqqqpgqmua7hcd05yxypyj7sv7pffrquy9gf86s535qxct34s";
    const LKMEX: &str = "4c4b4d45582d616162393130";
    const USDC: &str = "555344432d333530633465";
    const RIDE: &str = "524944452d303562316262";

    fn call(receiver: &str, name: &str, args: &[&str]) -> DecodedCall {
        DecodedCall {
            sender: SENDER.into(),
            receiver: receiver.into(),
            value: BigUint::default(),
            function_name: Some(name.into()),
            function_args: Some(args.iter().map(|a| a.to_string()).collect()),
        }
    }

    fn decode(c: &DecodedCall) -> Result<Option<TransactionMetadata>, DecodeError> {
        decode_multi_transfer(c, &AddressEncoder::default())
    }

    #[test]
    fn two_nft_legs_with_nested_call() {
        let c = call(
            SENDER,
            MULTI_ESDT_NFT_TRANSFER,
            &[
                CONTRACT_HEX,
                "02",
                LKMEX,
                "2fe3b0",
                "09b99a6db30027e4f3ec",
                LKMEX,
                "3102ca",
                "012630e9a29f2f93814491",
                "737761705f6c6b6d65785f746f5f65676c64",
                "0ede64311b8d01b5",
                "",
            ],
        );
        let meta = decode(&c).unwrap().unwrap();

        assert_eq!(meta.kind, TransactionKind::MultiTransfer);
        assert_eq!(meta.receiver, CONTRACT);
        assert_eq!(meta.value, BigUint::default());
        assert_eq!(meta.function_name.as_deref(), Some("swap_lkmex_to_egld"));
        assert_eq!(
            meta.function_args,
            Some(vec!["0ede64311b8d01b5".to_string(), String::new()])
        );

        let transfers = meta.transfers();
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].value.to_string(), "45925073746530627023852");
        assert_eq!(transfers[0].identifier(), Some("LKMEX-aab910-2fe3b0"));
        assert_eq!(transfers[1].value.to_string(), "1389278024872597502641297");
        assert_eq!(transfers[1].identifier(), Some("LKMEX-aab910-3102ca"));
    }

    #[test]
    fn fungible_legs_use_bare_identifier() {
        let c = call(
            SENDER,
            MULTI_ESDT_NFT_TRANSFER,
            &[CONTRACT_HEX, "02", RIDE, "00", "09b99a6db30027e4f3ec", USDC, "", "012630e9a29f2f93814491"],
        );
        let meta = decode(&c).unwrap().unwrap();
        assert!(meta.function_name.is_none());
        assert!(meta.function_args.is_none());

        let transfers = meta.transfers();
        let ride = transfers[0].properties.as_ref().unwrap();
        assert_eq!(ride.token.as_deref(), Some("RIDE-05b1bb"));
        assert_eq!(ride.collection, ride.identifier);
        let usdc = transfers[1].properties.as_ref().unwrap();
        assert_eq!(usdc.identifier.as_deref(), Some("USDC-350c4e"));
    }

    #[test]
    fn mixed_meta_and_fungible_legs() {
        let c = call(
            SENDER,
            MULTI_ESDT_NFT_TRANSFER,
            &[CONTRACT_HEX, "02", LKMEX, "2fe3b0", "01", USDC, "00", "02", "6465706f736974"],
        );
        let meta = decode(&c).unwrap().unwrap();
        assert_eq!(meta.transfers()[0].identifier(), Some("LKMEX-aab910-2fe3b0"));
        assert_eq!(meta.transfers()[1].identifier(), Some("USDC-350c4e"));
        assert_eq!(meta.function_name.as_deref(), Some("deposit"));
        assert_eq!(meta.function_args, Some(vec![]));
    }

    #[test]
    fn empty_nonce_leg_then_nft_leg() {
        let c = call(
            SENDER,
            MULTI_ESDT_NFT_TRANSFER,
            &[CONTRACT_HEX, "02", USDC, "", "0a", LKMEX, "2fe3b0", "01", "6465706f736974", "01"],
        );
        let meta = decode(&c).unwrap().unwrap();
        let ids: Vec<_> = meta.transfers().iter().map(|t| t.identifier()).collect();
        assert_eq!(ids, vec![Some("USDC-350c4e"), Some("LKMEX-aab910-2fe3b0")]);
        assert_eq!(meta.transfers()[0].value, BigUint::from(10u8));
        assert_eq!(meta.function_name.as_deref(), Some("deposit"));
        assert_eq!(meta.function_args, Some(vec!["01".to_string()]));
    }

    #[test]
    fn zero_count_yields_empty_transfer_list() {
        let c = call(SENDER, MULTI_ESDT_NFT_TRANSFER, &[CONTRACT_HEX, "00"]);
        // fewer than three arguments is not a multi-transfer at all
        assert!(decode(&c).unwrap().is_none());

        let c = call(SENDER, MULTI_ESDT_NFT_TRANSFER, &[CONTRACT_HEX, "00", "6465706f736974"]);
        let meta = decode(&c).unwrap().unwrap();
        assert_eq!(meta.transfers, Some(vec![]));
        assert_eq!(meta.function_name.as_deref(), Some("deposit"));
    }

    #[test]
    fn count_beyond_capacity_is_rejected() {
        let c = call(
            SENDER,
            MULTI_ESDT_NFT_TRANSFER,
            &[CONTRACT_HEX, "03", LKMEX, "01", "01", USDC, "00", "01"],
        );
        let err = decode(&c).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TransferCountOutOfRange { available: 2, .. }
        ));

        let huge = call(
            SENDER,
            MULTI_ESDT_NFT_TRANSFER,
            &[CONTRACT_HEX, "ffffffffffffffffffffffff", LKMEX, "01", "01"],
        );
        assert!(matches!(
            decode(&huge),
            Err(DecodeError::TransferCountOutOfRange { .. })
        ));
    }

    #[test]
    fn zero_padded_count_at_capacity() {
        let count = transfer_count("00000000000000000000000002", 8).unwrap();
        assert_eq!(count, 2);
        assert_eq!(transfer_count("00", 2).unwrap(), 0);
    }

    #[test]
    fn empty_count_is_hard_error() {
        let c = call(SENDER, MULTI_ESDT_NFT_TRANSFER, &[CONTRACT_HEX, "", LKMEX]);
        assert!(matches!(decode(&c), Err(DecodeError::InvalidHex { .. })));
    }

    #[test]
    fn soft_rejections() {
        let not_self = call(CONTRACT, MULTI_ESDT_NFT_TRANSFER, &[CONTRACT_HEX, "01", LKMEX, "01", "01"]);
        assert!(decode(&not_self).unwrap().is_none());

        let short_key = call(SENDER, MULTI_ESDT_NFT_TRANSFER, &["0102", "01", LKMEX, "01", "01"]);
        assert!(decode(&short_key).unwrap().is_none());

        let other = call(SENDER, "ESDTNFTTransfer", &[LKMEX, "01", "01", CONTRACT_HEX]);
        assert!(decode(&other).unwrap().is_none());
    }

    #[test]
    fn nft_classifier_declines_multi_payloads() {
        let c = call(
            SENDER,
            MULTI_ESDT_NFT_TRANSFER,
            &[CONTRACT_HEX, "01", LKMEX, "2fe3b0", "01"],
        );
        assert!(decode(&c).unwrap().is_some());
        assert!(decode_nft_transfer(&c, &AddressEncoder::default())
            .unwrap()
            .is_none());
    }
}
