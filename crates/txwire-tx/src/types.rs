//! The transaction model.
//!
//! Transactions are a tagged sum: the five envelope variants share no data
//! layout, so each gets its own struct and [`Transaction`] dispatches over
//! them. Values are immutable once constructed; the codec hands out a fresh
//! record per decode and never shares state.
//!
//! Integer fields follow the widths the wire actually needs: count-like
//! fields (`nonce`, `gas_limit`, `chain_id`) are `u64` and the decoder
//! rejects anything wider rather than truncating; value-like fields
//! (`value`, the fee fields, signature scalars) are `U256`.

use alloy_primitives::{Address, Bytes, B256, U256};
use txwire_crypto::Signature;

/// One access-list entry: an address and the storage keys it pre-declares.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessListEntry {
    /// The account the transaction plans to touch.
    pub address: Address,
    /// 32-byte storage slots under that account.
    pub storage_keys: Vec<B256>,
}

/// An EIP-7702 authorization tuple.
///
/// The nonce is an RLP *list* of zero or one elements on the wire: the
/// empty list means "no nonce bound", which is not the same thing as a
/// nonce of zero. `Option` preserves that distinction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Authorization {
    /// Chain the authorization is valid on.
    pub chain_id: u64,
    /// The delegate code address.
    pub address: Address,
    /// Optional bound nonce; `None` decodes from the empty list.
    pub nonce: Option<u64>,
    /// Recovery parity of the authorization's own signature.
    pub y_parity: u8,
    /// First signature scalar.
    pub r: U256,
    /// Second signature scalar.
    pub s: U256,
}

/// Pre-EIP-2718 transaction, a bare RLP list on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyTx {
    /// Sender account nonce.
    pub nonce: u64,
    /// Wei per gas unit.
    pub gas_price: U256,
    /// Gas ceiling for execution.
    pub gas_limit: u64,
    /// Recipient, or `None` for contract creation.
    pub to: Option<Address>,
    /// Wei transferred.
    pub value: U256,
    /// Calldata or init code.
    pub data: Bytes,
    /// `(v, r, s)` when signed. Legacy `v` is either `{27, 28}` or
    /// `chain_id · 2 + 35 + parity`.
    pub signature: Option<Signature>,
}

/// EIP-2930 access-list transaction, envelope type `0x01`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessListTx {
    /// Chain the transaction is bound to.
    pub chain_id: u64,
    /// Sender account nonce.
    pub nonce: u64,
    /// Wei per gas unit.
    pub gas_price: U256,
    /// Gas ceiling for execution.
    pub gas_limit: u64,
    /// Recipient, or `None` for contract creation.
    pub to: Option<Address>,
    /// Wei transferred.
    pub value: U256,
    /// Calldata or init code.
    pub data: Bytes,
    /// Pre-declared state accesses.
    pub access_list: Vec<AccessListEntry>,
    /// `(y_parity, r, s)` when signed; `v` holds the bare parity.
    pub signature: Option<Signature>,
}

/// EIP-1559 dynamic-fee transaction, envelope type `0x02`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicFeeTx {
    /// Chain the transaction is bound to.
    pub chain_id: u64,
    /// Sender account nonce.
    pub nonce: u64,
    /// Tip cap in wei per gas unit.
    pub max_priority_fee_per_gas: U256,
    /// Total fee cap in wei per gas unit.
    pub max_fee_per_gas: U256,
    /// Gas ceiling for execution.
    pub gas_limit: u64,
    /// Recipient, or `None` for contract creation.
    pub to: Option<Address>,
    /// Wei transferred.
    pub value: U256,
    /// Calldata or init code.
    pub data: Bytes,
    /// Pre-declared state accesses.
    pub access_list: Vec<AccessListEntry>,
    /// `(y_parity, r, s)` when signed.
    pub signature: Option<Signature>,
}

/// EIP-4844 blob transaction, envelope type `0x03`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlobTx {
    /// Chain the transaction is bound to.
    pub chain_id: u64,
    /// Sender account nonce.
    pub nonce: u64,
    /// Tip cap in wei per gas unit.
    pub max_priority_fee_per_gas: U256,
    /// Total fee cap in wei per gas unit.
    pub max_fee_per_gas: U256,
    /// Gas ceiling for execution.
    pub gas_limit: u64,
    /// Recipient, or `None` for contract creation.
    pub to: Option<Address>,
    /// Wei transferred.
    pub value: U256,
    /// Calldata.
    pub data: Bytes,
    /// Pre-declared state accesses.
    pub access_list: Vec<AccessListEntry>,
    /// Wei per blob gas unit.
    pub max_fee_per_blob_gas: U256,
    /// Versioned commitments to the sidecar blobs, 32 bytes each.
    pub blob_versioned_hashes: Vec<B256>,
    /// `(y_parity, r, s)` when signed.
    pub signature: Option<Signature>,
}

/// EIP-7702 set-code transaction, envelope type `0x04`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetCodeTx {
    /// Chain the transaction is bound to.
    pub chain_id: u64,
    /// Sender account nonce.
    pub nonce: u64,
    /// Tip cap in wei per gas unit.
    pub max_priority_fee_per_gas: U256,
    /// Total fee cap in wei per gas unit.
    pub max_fee_per_gas: U256,
    /// Gas ceiling for execution.
    pub gas_limit: u64,
    /// Recipient, or `None` for contract creation.
    pub to: Option<Address>,
    /// Wei transferred.
    pub value: U256,
    /// Calldata.
    pub data: Bytes,
    /// Pre-declared state accesses.
    pub access_list: Vec<AccessListEntry>,
    /// Per-account delegation records. The transaction's own signature
    /// lives in `signature`, never inside a tuple.
    pub authorization_list: Vec<Authorization>,
    /// `(y_parity, r, s)` when signed.
    pub signature: Option<Signature>,
}

/// A wire transaction in any of the five envelopes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transaction {
    /// Bare RLP list, no type prefix.
    Legacy(LegacyTx),
    /// EIP-2930, type `0x01`.
    AccessList(AccessListTx),
    /// EIP-1559, type `0x02`.
    DynamicFee(DynamicFeeTx),
    /// EIP-4844, type `0x03`.
    Blob(BlobTx),
    /// EIP-7702, type `0x04`.
    SetCode(SetCodeTx),
}

impl Transaction {
    /// The envelope type byte; `None` for legacy.
    #[must_use]
    pub const fn type_byte(&self) -> Option<u8> {
        match self {
            Self::Legacy(_) => None,
            Self::AccessList(_) => Some(0x01),
            Self::DynamicFee(_) => Some(0x02),
            Self::Blob(_) => Some(0x03),
            Self::SetCode(_) => Some(0x04),
        }
    }

    /// The signature, if the transaction carries one.
    #[must_use]
    pub const fn signature(&self) -> Option<&Signature> {
        match self {
            Self::Legacy(tx) => tx.signature.as_ref(),
            Self::AccessList(tx) => tx.signature.as_ref(),
            Self::DynamicFee(tx) => tx.signature.as_ref(),
            Self::Blob(tx) => tx.signature.as_ref(),
            Self::SetCode(tx) => tx.signature.as_ref(),
        }
    }

    /// Whether a signature is present.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.signature().is_some()
    }

    /// The chain the transaction is bound to.
    ///
    /// Typed envelopes carry the field explicitly. A legacy transaction
    /// implies it through `v`: replay-protected signatures yield
    /// `(v − 35) / 2`, pre-EIP-155 signatures (and unsigned payloads)
    /// yield `None`.
    #[must_use]
    pub fn chain_id(&self) -> Option<u64> {
        match self {
            Self::Legacy(tx) => match &tx.signature {
                Some(sig) if sig.v >= 35 => Some((sig.v - 35) / 2),
                _ => None,
            },
            Self::AccessList(tx) => Some(tx.chain_id),
            Self::DynamicFee(tx) => Some(tx.chain_id),
            Self::Blob(tx) => Some(tx.chain_id),
            Self::SetCode(tx) => Some(tx.chain_id),
        }
    }

    /// The recipient, or `None` for contract creation.
    #[must_use]
    pub const fn to(&self) -> Option<&Address> {
        match self {
            Self::Legacy(tx) => tx.to.as_ref(),
            Self::AccessList(tx) => tx.to.as_ref(),
            Self::DynamicFee(tx) => tx.to.as_ref(),
            Self::Blob(tx) => tx.to.as_ref(),
            Self::SetCode(tx) => tx.to.as_ref(),
        }
    }

    /// The gas ceiling.
    #[must_use]
    pub const fn gas_limit(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.gas_limit,
            Self::AccessList(tx) => tx.gas_limit,
            Self::DynamicFee(tx) => tx.gas_limit,
            Self::Blob(tx) => tx.gas_limit,
            Self::SetCode(tx) => tx.gas_limit,
        }
    }

    /// The sender nonce.
    #[must_use]
    pub const fn nonce(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.nonce,
            Self::AccessList(tx) => tx.nonce,
            Self::DynamicFee(tx) => tx.nonce,
            Self::Blob(tx) => tx.nonce,
            Self::SetCode(tx) => tx.nonce,
        }
    }

    /// The wei transferred.
    #[must_use]
    pub const fn value(&self) -> U256 {
        match self {
            Self::Legacy(tx) => tx.value,
            Self::AccessList(tx) => tx.value,
            Self::DynamicFee(tx) => tx.value,
            Self::Blob(tx) => tx.value,
            Self::SetCode(tx) => tx.value,
        }
    }

    /// Replace the signature, keeping everything else.
    pub(crate) fn set_signature(&mut self, signature: Signature) {
        match self {
            Self::Legacy(tx) => tx.signature = Some(signature),
            Self::AccessList(tx) => tx.signature = Some(signature),
            Self::DynamicFee(tx) => tx.signature = Some(signature),
            Self::Blob(tx) => tx.signature = Some(signature),
            Self::SetCode(tx) => tx.signature = Some(signature),
        }
    }
}
