//! Core types for decoded transaction metadata.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── RawTransaction ───────────────────────────────────────────────────────────

/// A transaction envelope as received from a node, wallet or explorer API.
/// This is the input to every decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Sender address (bech32).
    pub sender: String,
    /// Receiver address (bech32). For self-directed transfer calls this
    /// equals the sender.
    pub receiver: String,
    /// Native value as a decimal string.
    #[serde(default = "default_value")]
    pub value: String,
    /// Base64 payload. Empty for a plain value move.
    #[serde(default)]
    pub data: String,
}

fn default_value() -> String {
    "0".to_string()
}

impl RawTransaction {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        value: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            value: value.into(),
            data: data.into(),
        }
    }
}

// ─── TransactionKind ──────────────────────────────────────────────────────────

/// How the decoder classified a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Plain native value move, or a payload that is not a contract call.
    Transfer,
    /// A contract call that matched none of the known transfer protocols.
    SmartContractCall,
    /// Single fungible token transfer.
    EsdtTransfer,
    /// Single non-fungible / semi-fungible token transfer.
    NftTransfer,
    /// Batched transfer of several tokens to one recipient.
    MultiTransfer,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer => write!(f, "transfer"),
            Self::SmartContractCall => write!(f, "smart contract call"),
            Self::EsdtTransfer => write!(f, "esdt transfer"),
            Self::NftTransfer => write!(f, "nft transfer"),
            Self::MultiTransfer => write!(f, "multi transfer"),
        }
    }
}

// ─── Token transfers ──────────────────────────────────────────────────────────

/// Identifiers of the token moved by a single transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransferProperties {
    /// Fungible token ticker (e.g. `"USDC-350c4e"`). `None` for NFT/SFT legs.
    pub token: Option<String>,
    /// Collection or token identifier (e.g. `"LKMEX-aab910"`).
    pub collection: Option<String>,
    /// Full identifier. For NFT/SFT legs this is `<collection>-<nonce>`,
    /// for fungible tokens it equals the collection.
    pub identifier: Option<String>,
}

impl TokenTransferProperties {
    /// Properties of a fungible token: ticker, collection and identifier coincide.
    pub fn fungible(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: Some(token.clone()),
            collection: Some(token.clone()),
            identifier: Some(token),
        }
    }

    /// Properties of a nonce-qualified token. The nonce is kept in the hex
    /// form it had in the payload.
    pub fn non_fungible(collection: impl Into<String>, nonce: &str) -> Self {
        let collection = collection.into();
        let identifier = format!("{collection}-{nonce}");
        Self {
            token: None,
            collection: Some(collection),
            identifier: Some(identifier),
        }
    }
}

/// A single token movement extracted from the call arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    #[serde(with = "biguint_string")]
    pub value: BigUint,
    pub properties: Option<TokenTransferProperties>,
}

impl Transfer {
    pub fn new(value: BigUint, properties: TokenTransferProperties) -> Self {
        Self {
            value,
            properties: Some(properties),
        }
    }

    /// The most specific identifier available for display.
    pub fn identifier(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.identifier.as_deref().or(p.collection.as_deref()))
    }
}

// ─── TransactionMetadata ──────────────────────────────────────────────────────

/// The result of decoding a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMetadata {
    pub sender: String,
    /// The actual recipient. For self-directed transfer calls this is the
    /// address decoded from the call arguments, not the envelope receiver.
    pub receiver: String,
    #[serde(with = "biguint_string")]
    pub value: BigUint,
    pub kind: TransactionKind,
    pub function_name: Option<String>,
    /// Residual hex arguments of the (nested) function call.
    pub function_args: Option<Vec<String>>,
    pub transfers: Option<Vec<Transfer>>,
}

impl TransactionMetadata {
    /// A plain value move with no call metadata.
    pub fn plain(sender: impl Into<String>, receiver: impl Into<String>, value: BigUint) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            value,
            kind: TransactionKind::Transfer,
            function_name: None,
            function_args: None,
            transfers: None,
        }
    }

    /// Transfers as a slice; empty when none were decoded.
    pub fn transfers(&self) -> &[Transfer] {
        self.transfers.as_deref().unwrap_or(&[])
    }

    /// Returns `true` if at least one token transfer was decoded.
    pub fn has_transfers(&self) -> bool {
        !self.transfers().is_empty()
    }
}

impl fmt::Display for TransactionMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.transfers() {
            [] => match &self.function_name {
                Some(name) => write!(f, "call {name} on {}", self.receiver)?,
                None => write!(
                    f,
                    "transfer {} from {} to {}",
                    self.value, self.sender, self.receiver
                )?,
            },
            transfers => {
                let legs: Vec<_> = transfers
                    .iter()
                    .map(|t| format!("{} {}", t.value, t.identifier().unwrap_or("?")))
                    .collect();
                write!(
                    f,
                    "transfer {} from {} to {}",
                    legs.join(", "),
                    self.sender,
                    self.receiver
                )?;
                if let Some(name) = &self.function_name {
                    write!(f, " and call {name}")?;
                }
            }
        }
        Ok(())
    }
}

// ─── Serde helpers ────────────────────────────────────────────────────────────

/// Serialize a `BigUint` as a decimal string so values above 2^64 survive
/// JSON consumers that parse numbers as doubles.
pub mod biguint_string {
    use num_bigint::BigUint;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        BigUint::parse_bytes(s.as_bytes(), 10)
            .ok_or_else(|| D::Error::custom(format!("invalid decimal integer: {s:?}")))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_transaction_defaults() {
        let tx: RawTransaction =
            serde_json::from_str(r#"{"sender":"erd1a","receiver":"erd1b"}"#).unwrap();
        assert_eq!(tx.value, "0");
        assert!(tx.data.is_empty());
    }

    #[test]
    fn non_fungible_identifier_keeps_nonce() {
        let props = TokenTransferProperties::non_fungible("LKMEX-aab910", "2fb4e9");
        assert_eq!(props.collection.as_deref(), Some("LKMEX-aab910"));
        assert_eq!(props.identifier.as_deref(), Some("LKMEX-aab910-2fb4e9"));
        assert!(props.token.is_none());
    }

    #[test]
    fn fungible_identifier_equals_collection() {
        let props = TokenTransferProperties::fungible("USDC-350c4e");
        assert_eq!(props.collection, props.identifier);
        assert_eq!(props.token.as_deref(), Some("USDC-350c4e"));
    }

    #[test]
    fn metadata_value_serializes_as_decimal_string() {
        let value: BigUint = "1076977887712805212893260".parse().unwrap();
        let meta = TransactionMetadata::plain("erd1a", "erd1b", value.clone());
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["value"], "1076977887712805212893260");
        assert_eq!(json["kind"], "transfer");
        assert!(json["transfers"].is_null());

        let back: TransactionMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(back.value, value);
    }

    #[test]
    fn display_plain_and_call() {
        let mut meta = TransactionMetadata::plain("erd1a", "erd1b", BigUint::from(5u8));
        assert_eq!(meta.to_string(), "transfer 5 from erd1a to erd1b");

        meta.function_name = Some("withdrawGlobalOffer".into());
        meta.kind = TransactionKind::SmartContractCall;
        assert_eq!(meta.to_string(), "call withdrawGlobalOffer on erd1b");
    }

    #[test]
    fn display_with_transfers() {
        let mut meta = TransactionMetadata::plain("erd1a", "erd1b", BigUint::from(0u8));
        meta.kind = TransactionKind::EsdtTransfer;
        meta.transfers = Some(vec![Transfer::new(
            BigUint::from(10u8),
            TokenTransferProperties::fungible("TEST-2e40d7"),
        )]);
        meta.function_name = Some("deposit".into());
        assert_eq!(
            meta.to_string(),
            "transfer 10 TEST-2e40d7 from erd1a to erd1b and call deposit"
        );
    }

    #[test]
    fn kind_serde() {
        let json = serde_json::to_string(&TransactionKind::MultiTransfer).unwrap();
        assert_eq!(json, "\"multi_transfer\"");
    }
}
