//! Smart-contract call parsing.
//!
//! A MultiversX call payload is `functionName@arg1@arg2@...`, base64-encoded
//! in the transaction `data` field, with every argument hex-encoded. The
//! parser only attaches call metadata when every argument passes
//! [`is_smart_contract_argument`]; anything else is treated as free-form data
//! on a plain value transfer.

use chaintx_core::error::DecodeError;
use chaintx_core::types::{RawTransaction, TransactionKind, TransactionMetadata};
use num_bigint::BigUint;
use tracing::debug;

use crate::codec::{base64_to_string, hex_to_string, is_smart_contract_argument, parse_decimal};

/// Separator between the function name and its arguments.
pub const ARGUMENT_SEPARATOR: char = '@';

/// A transaction envelope with its payload split into a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCall {
    pub sender: String,
    pub receiver: String,
    pub value: BigUint,
    pub function_name: Option<String>,
    pub function_args: Option<Vec<String>>,
}

impl DecodedCall {
    /// Parse the envelope and payload of `tx`.
    pub fn parse(tx: &RawTransaction) -> Result<Self, DecodeError> {
        let mut call = Self {
            sender: tx.sender.clone(),
            receiver: tx.receiver.clone(),
            value: parse_decimal(&tx.value)?,
            function_name: None,
            function_args: None,
        };

        if tx.data.is_empty() {
            return Ok(call);
        }

        let payload = base64_to_string(&tx.data)?;
        if payload.is_empty() {
            return Ok(call);
        }
        let mut components = payload.split(ARGUMENT_SEPARATOR);
        let function_name = components.next().unwrap_or_default().to_string();
        let args: Vec<String> = components.map(str::to_string).collect();

        if args.iter().all(|arg| is_smart_contract_argument(arg)) {
            call.function_name = Some(function_name);
            call.function_args = Some(args);
        } else {
            debug!(
                sender = %tx.sender,
                "payload arguments are not call hex, treating data as plain text"
            );
        }

        Ok(call)
    }

    /// Call arguments as a slice; empty when the payload was not a call.
    pub fn args(&self) -> &[String] {
        self.function_args.as_deref().unwrap_or(&[])
    }

    /// Returns `true` if the function name equals `selector`.
    pub fn is_function(&self, selector: &str) -> bool {
        self.function_name.as_deref() == Some(selector)
    }

    /// Returns `true` for self-directed calls, the convention used by the
    /// NFT and multi-token transfer built-ins.
    pub fn is_self_directed(&self) -> bool {
        self.sender == self.receiver
    }

    /// The least specific interpretation: a plain transfer or an opaque call.
    pub fn into_metadata(self) -> TransactionMetadata {
        let kind = if self.function_name.is_some() {
            TransactionKind::SmartContractCall
        } else {
            TransactionKind::Transfer
        };
        TransactionMetadata {
            sender: self.sender,
            receiver: self.receiver,
            value: self.value,
            kind,
            function_name: self.function_name,
            function_args: self.function_args,
            transfers: None,
        }
    }
}

/// Split the arguments left over after a transfer's own fields into the
/// endpoint it pays for: the first is the hex-encoded function name, the rest
/// are passed through untouched.
pub fn nested_call(
    trailing: &[String],
) -> Result<(Option<String>, Option<Vec<String>>), DecodeError> {
    match trailing.split_first() {
        None => Ok((None, None)),
        Some((name, args)) => Ok((
            Some(hex_to_string("nested function name", name)?),
            Some(args.to_vec()),
        )),
    }
}
