//! # txwire-crypto
//!
//! Keccak-256, address utilities, and the secp256k1 signature engine.
//!
//! Everything here is pure and stateless: operations take their inputs by
//! value or borrowed slice, return fresh values, and retain nothing. The
//! engine is safe to call from any number of threads with no coordination.
//!
//! ## Modules
//!
//! - [`keccak`] - Keccak-256 digest, address derivation, EIP-55 checksum
//! - [`keys`] - Zeroized private key material
//! - [`signature`] - sign / recover / normalize and the `v` arithmetic
//!
//! ## Example
//!
//! ```rust
//! use txwire_crypto::{keccak256, recover_address, sign, SecretKey};
//!
//! let key = SecretKey::generate();
//! let digest = keccak256(b"hello");
//! let signature = sign(digest.as_slice(), &key, None).unwrap();
//! let sender = recover_address(digest.as_slice(), &signature, None).unwrap();
//! assert_eq!(sender.len(), 20);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod keccak;
pub mod keys;
pub mod signature;

pub use keccak::{address_from_public_key, checksum_encode, checksum_verify, keccak256};
pub use keys::{SecretKey, SECRET_KEY_LEN};
pub use signature::{
    encode_v, is_valid_signature, normalize_signature, recover_address, recover_public_key,
    recovery_parity, sign, Signature, SECP256K1_HALF_ORDER, SECP256K1_ORDER,
};

// Re-export the signature error for downstream match arms.
pub use txwire_core::{SignatureError, SignatureResult};
