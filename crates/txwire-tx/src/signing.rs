//! Signing preimages, transaction hashes, and sender recovery.
//!
//! Three digests matter per transaction:
//!
//! - the **signing hash**, Keccak over the unsigned field set (legacy
//!   EIP-155 appends `chain_id, 0, 0`; typed envelopes prefix their type
//!   byte),
//! - the **transaction hash**, Keccak over the full wire encoding,
//! - and nothing else: the codec never hashes intermediate forms.
//!
//! Sender recovery ties them together: derive the chain ID the signature
//! was made under, rebuild the signing hash, and hand digest plus
//! signature to the recovery engine.

use alloy_primitives::{Address, B256};
use txwire_core::{SignatureError, SignatureResult};
use txwire_crypto::{keccak256, recover_address, sign, SecretKey, Signature};
use txwire_rlp::{self as rlp, Item};

use crate::codec::{encode_transaction, unsigned_fields};
use crate::types::Transaction;

/// Keccak over the full wire encoding, type prefix included.
///
/// For an unsigned transaction this hashes the unsigned layout; for legacy
/// pre-EIP-155 that doubles as the signing preimage.
#[must_use]
pub fn transaction_hash(tx: &Transaction) -> B256 {
    keccak256(encode_transaction(tx))
}

/// The digest a signer commits to.
///
/// - Legacy without a chain ID: Keccak over the six unsigned fields.
/// - Legacy with a chain ID: Keccak over those six plus
///   `chain_id, 0, 0` (the EIP-155 replay guard).
/// - Typed envelopes: Keccak over `type_byte ‖ RLP(unsigned fields)`; the
///   `chain_id` argument is ignored because the field is part of the
///   payload itself.
#[must_use]
pub fn signing_hash(tx: &Transaction, chain_id: Option<u64>) -> B256 {
    match tx.type_byte() {
        None => {
            let mut items = unsigned_fields(tx);
            if let Some(chain_id) = chain_id {
                items.push(Item::from_u64(chain_id));
                items.push(Item::from_u64(0));
                items.push(Item::from_u64(0));
            }
            keccak256(rlp::encode(&Item::list(items)))
        }
        Some(type_byte) => {
            let mut preimage = vec![type_byte];
            rlp::encode_into(&Item::list(unsigned_fields(tx)), &mut preimage);
            keccak256(preimage)
        }
    }
}

impl Transaction {
    /// Keccak over the full wire encoding. See [`transaction_hash`].
    #[must_use]
    pub fn hash(&self) -> B256 {
        transaction_hash(self)
    }

    /// The digest a signer commits to. See [`signing_hash`].
    #[must_use]
    pub fn signing_hash(&self, chain_id: Option<u64>) -> B256 {
        signing_hash(self, chain_id)
    }

    /// Recover the sender address from the embedded signature.
    ///
    /// The chain ID is taken from the transaction itself: the explicit
    /// field for typed envelopes, the `v` encoding for legacy. High-`s`
    /// signatures are normalized inside the recovery engine.
    ///
    /// # Errors
    ///
    /// [`SignatureError::MalformedSignature`] when the transaction is
    /// unsigned, plus every failure mode of
    /// [`recover_address`](txwire_crypto::recover_address).
    pub fn recover_sender(&self) -> SignatureResult<Address> {
        let signature = self.signature().ok_or(SignatureError::MalformedSignature)?;
        match self.type_byte() {
            None => {
                let chain_id = self.chain_id();
                let digest = signing_hash(self, chain_id);
                recover_address(digest.as_slice(), signature, chain_id)
            }
            Some(_) => {
                let digest = signing_hash(self, None);
                recover_address(digest.as_slice(), signature, None)
            }
        }
    }

    /// Sign the transaction, replacing any existing signature.
    ///
    /// For a legacy transaction the `chain_id` argument selects between
    /// pre-EIP-155 (`v ∈ {27, 28}`) and replay-protected
    /// (`v = chain_id · 2 + 35 + parity`) signing. Typed envelopes ignore
    /// it and store the bare parity.
    ///
    /// # Errors
    ///
    /// [`SignatureError::InvalidPrivateKey`] for an out-of-range key; the
    /// digest length cannot be wrong here.
    pub fn sign_with(mut self, key: &SecretKey, chain_id: Option<u64>) -> SignatureResult<Self> {
        let signature = match self.type_byte() {
            None => sign(signing_hash(&self, chain_id).as_slice(), key, chain_id)?,
            Some(_) => {
                let raw = sign(signing_hash(&self, None).as_slice(), key, None)?;
                Signature::from_parity(raw.recovery_parity(None)?, raw.r, raw.s)
            }
        };
        self.set_signature(signature);
        Ok(self)
    }
}
