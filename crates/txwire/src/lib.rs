//! # txwire
//!
//! Bit-exact Ethereum transaction codec and signature engine.
//!
//! Given opaque bytes pulled from a peer, produce a strongly-typed
//! [`Transaction`]; given a transaction, produce exactly the bytes a
//! canonical node would broadcast; given a transaction and its signature,
//! recover the sender address. The codec is a bijection on valid wire
//! bytes: `encode(decode(x)) == x` for every input it accepts.
//!
//! Block processing, state execution, transaction pools, networking, and
//! persistence are all out of scope; callers wrap this core with their own
//! surfaces.
//!
//! ## Quick start
//!
//! ```rust
//! use txwire::{decode_transaction, encode_transaction, SecretKey, Transaction};
//! use txwire::{DynamicFeeTx, U256};
//!
//! let tx = Transaction::DynamicFee(DynamicFeeTx {
//!     chain_id: 1,
//!     nonce: 0,
//!     max_priority_fee_per_gas: U256::from(1_000_000_000u64),
//!     max_fee_per_gas: U256::from(30_000_000_000u64),
//!     gas_limit: 21000,
//!     to: Some([0x42; 20].into()),
//!     value: U256::from(1_000_000u64),
//!     data: Default::default(),
//!     access_list: vec![],
//!     signature: None,
//! });
//!
//! let key = SecretKey::generate();
//! let signed = tx.sign_with(&key, None).unwrap();
//! let raw = encode_transaction(&signed);
//!
//! let roundtrip = decode_transaction(&raw).unwrap();
//! assert_eq!(roundtrip, signed);
//! assert!(roundtrip.recover_sender().is_ok());
//! ```
//!
//! ## Crate layout
//!
//! This crate re-exports the member crates; depend on it rather than on
//! them:
//!
//! - `txwire-rlp` - the canonical length-prefix grammar
//! - `txwire-crypto` - Keccak-256, addresses, secp256k1 sign/recover
//! - `txwire-tx` - the five transaction envelopes
//! - `txwire-core` - the error taxonomy

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// Codec API
pub use txwire_tx::{
    decode_transaction, encode_transaction, signing_hash, transaction_hash, AccessListEntry,
    AccessListTx, Authorization, BlobTx, DynamicFeeTx, LegacyTx, SetCodeTx, Transaction,
};

// Signature API
pub use txwire_crypto::{
    is_valid_signature, normalize_signature, recover_address, recover_public_key, sign, SecretKey,
    Signature, SECP256K1_HALF_ORDER, SECP256K1_ORDER,
};

// Keccak API
pub use txwire_crypto::{address_from_public_key, checksum_encode, checksum_verify, keccak256};

// Grammar layer, for callers that speak raw items
pub use txwire_rlp::{decode as rlp_decode, encode as rlp_encode, Item, MAX_DEPTH};

// Errors
pub use txwire_core::{DecodeError, RlpError, SignatureError, TxWireError};

// Primitive types the API surfaces
pub use alloy_primitives::{Address, Bytes, B256, U256};
