//! Private key material with secure memory handling.
//!
//! A [`SecretKey`] is the 32-byte scalar handed to the signature engine.
//! The type is deliberately inconvenient: it cannot be cloned, it zeroizes
//! itself on drop, its `Debug` output is redacted, and equality runs in
//! constant time. The engine never retains a reference to it beyond the
//! signing call.

use k256::ecdsa::SigningKey;
use rand::RngCore;
use subtle::ConstantTimeEq;
use txwire_core::{SignatureError, SignatureResult};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The length of a secret key in bytes.
pub const SECRET_KEY_LEN: usize = 32;

/// A 32-byte secp256k1 private key, zeroized on drop.
///
/// Intentionally not `Clone`: key material is moved, never duplicated.
///
/// # Example
///
/// ```rust
/// use txwire_crypto::SecretKey;
///
/// let key = SecretKey::generate();
/// assert_eq!(format!("{key:?}"), "SecretKey([REDACTED])");
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: [u8; SECRET_KEY_LEN],
}

impl SecretKey {
    /// Wrap raw key bytes.
    ///
    /// The bytes are copied; callers should zeroize their own copy when it
    /// is no longer needed. Validity against the curve order is checked at
    /// signing time, not here.
    #[must_use]
    pub const fn new(bytes: [u8; SECRET_KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Generate a fresh key from the operating system RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; SECRET_KEY_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Expose the raw bytes for a cryptographic operation.
    ///
    /// The reference must not outlive the immediate operation.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SECRET_KEY_LEN] {
        &self.bytes
    }

    /// Interpret the key as a secp256k1 signing key.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::InvalidPrivateKey`] when the bytes are not
    /// a valid scalar (zero, or at least the group order).
    pub fn to_signing_key(&self) -> SignatureResult<SigningKey> {
        SigningKey::from_bytes((&self.bytes).into())
            .map_err(|_| SignatureError::InvalidPrivateKey)
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl Eq for SecretKey {}

impl From<[u8; SECRET_KEY_LEN]> for SecretKey {
    fn from(bytes: [u8; SECRET_KEY_LEN]) -> Self {
        Self::new(bytes)
    }
}
