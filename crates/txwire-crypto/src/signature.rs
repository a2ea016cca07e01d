//! secp256k1 signing, public-key recovery, and `v` arithmetic.
//!
//! The `v` component is a three-valued problem: pre-EIP-155 legacy
//! signatures carry `27 + parity`, replay-protected legacy signatures fold
//! the chain ID in as `chain_id · 2 + 35 + parity`, and typed envelopes
//! carry the bare parity. [`recovery_parity`] inverts all three as a
//! total-case match; any combination it does not list is an error, never a
//! default.
//!
//! Signing is RFC-6979 deterministic ECDSA via `k256`. Produced signatures
//! are always low-`s`; recovery normalizes high-`s` input (flipping the
//! parity with it) rather than rejecting, so pre-EIP-2 chain history stays
//! recoverable.

use alloy_primitives::{Address, U256};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use txwire_core::{SignatureError, SignatureResult};

use crate::keccak::address_from_public_key;
use crate::keys::SecretKey;

/// The secp256k1 group order `n`.
pub const SECP256K1_ORDER: U256 = U256::from_limbs([
    0xbfd2_5e8c_d036_4141,
    0xbaae_dce6_af48_a03b,
    0xffff_ffff_ffff_fffe,
    0xffff_ffff_ffff_ffff,
]);

/// `n / 2`, the low-`s` boundary of EIP-2.
pub const SECP256K1_HALF_ORDER: U256 = U256::from_limbs([
    0xdfe9_2f46_681b_20a0,
    0x5d57_6e73_57a4_501d,
    0xffff_ffff_ffff_ffff,
    0x7fff_ffff_ffff_ffff,
]);

/// An ECDSA signature in wire form.
///
/// `v` holds whatever the envelope carries: `{27, 28}` for pre-EIP-155
/// legacy, `chain_id · 2 + 35 + parity` for replay-protected legacy, or the
/// bare parity `{0, 1}` for typed envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signature {
    /// Recovery component in its wire encoding.
    pub v: u64,
    /// First signature scalar.
    pub r: U256,
    /// Second signature scalar.
    pub s: U256,
}

impl Signature {
    /// Construct from explicit components.
    #[must_use]
    pub const fn new(v: u64, r: U256, s: U256) -> Self {
        Self { v, r, s }
    }

    /// Construct from a bare recovery parity, the typed-envelope form.
    #[must_use]
    pub fn from_parity(parity: u8, r: U256, s: U256) -> Self {
        Self {
            v: u64::from(parity & 1),
            r,
            s,
        }
    }

    /// Derive the recovery parity from `v` under the given chain ID.
    ///
    /// # Errors
    ///
    /// [`SignatureError::InvalidRecoveryId`] for any `(v, chain_id)` pair
    /// outside the three encodings.
    pub fn recovery_parity(&self, chain_id: Option<u64>) -> SignatureResult<u8> {
        recovery_parity(self.v, chain_id)
    }

    /// Whether both scalars are in `[1, n - 1]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let in_range = |x: &U256| *x != U256::ZERO && *x < SECP256K1_ORDER;
        in_range(&self.r) && in_range(&self.s)
    }

    /// Whether `s` is on the low half of the curve order.
    #[must_use]
    pub fn is_low_s(&self) -> bool {
        self.s <= SECP256K1_HALF_ORDER
    }

    /// Return the low-`s` form of this signature.
    ///
    /// A high `s` is replaced with `n - s` and the parity inside `v` flips
    /// with it; a low-`s` signature is returned unchanged, so the operation
    /// is idempotent. The recovered key is the same either way. A `v`
    /// outside the three known encodings is left untouched (recovery will
    /// reject it).
    #[must_use]
    pub fn normalized(&self) -> Self {
        if self.is_low_s() {
            return *self;
        }
        let flipped = match self.v {
            0 => 1,
            1 => 0,
            27 => 28,
            28 => 27,
            v if v >= 35 => {
                if (v - 35) % 2 == 0 {
                    v + 1
                } else {
                    v - 1
                }
            }
            v => v,
        };
        Self {
            v: flipped,
            r: self.r,
            s: SECP256K1_ORDER - self.s,
        }
    }
}

/// Derive the recovery parity from a `v` value under the given chain ID.
///
/// - `v ∈ {0, 1}` is the parity itself (typed envelopes).
/// - `v ∈ {27, 28}` maps to `v − 27` (pre-EIP-155 legacy).
/// - `v ≥ 35` with a chain ID maps to `v − 35 − 2 · chain_id`, which must
///   land in `{0, 1}`.
///
/// # Errors
///
/// [`SignatureError::InvalidRecoveryId`] for everything else, including
/// `v ≥ 35` without a chain ID and chain IDs whose `v` would overflow.
pub fn recovery_parity(v: u64, chain_id: Option<u64>) -> SignatureResult<u8> {
    let invalid = SignatureError::InvalidRecoveryId { v };
    match v {
        0 | 1 => Ok(u8::try_from(v).unwrap_or(0)),
        27 | 28 => Ok(u8::try_from(v - 27).unwrap_or(0)),
        _ if v >= 35 => {
            let chain_id = chain_id.ok_or(invalid.clone())?;
            let base = chain_id
                .checked_mul(2)
                .and_then(|x| x.checked_add(35))
                .ok_or(invalid.clone())?;
            match v.checked_sub(base) {
                Some(0) => Ok(0),
                Some(1) => Ok(1),
                _ => Err(invalid),
            }
        }
        _ => Err(invalid),
    }
}

/// Encode a recovery parity as a legacy `v` value.
///
/// `27 + parity` without a chain ID, `chain_id · 2 + 35 + parity` with one.
///
/// # Errors
///
/// [`SignatureError::InvalidRecoveryId`] when the chain ID is large enough
/// to overflow the computation.
pub fn encode_v(parity: u8, chain_id: Option<u64>) -> SignatureResult<u64> {
    let parity = u64::from(parity & 1);
    match chain_id {
        None => Ok(27 + parity),
        Some(chain_id) => chain_id
            .checked_mul(2)
            .and_then(|x| x.checked_add(35 + parity))
            .ok_or(SignatureError::InvalidRecoveryId { v: parity }),
    }
}

/// Sign a 32-byte digest.
///
/// Deterministic (RFC 6979); the result is always low-`s`, with the
/// recovery parity flipped whenever normalization flipped `s`. The `v`
/// component is `27 + parity` without a chain ID and
/// `chain_id · 2 + 35 + parity` with one; typed-envelope callers read the
/// parity back via [`Signature::recovery_parity`].
///
/// # Errors
///
/// - [`SignatureError::InvalidDigestLength`] unless the digest is 32 bytes.
/// - [`SignatureError::InvalidPrivateKey`] for an out-of-range scalar.
///
/// # Example
///
/// ```rust
/// use txwire_crypto::{keccak256, recover_address, sign, SecretKey};
///
/// let key = SecretKey::generate();
/// let digest = keccak256(b"payload");
/// let signature = sign(digest.as_slice(), &key, Some(1)).unwrap();
/// assert!(recover_address(digest.as_slice(), &signature, Some(1)).is_ok());
/// ```
pub fn sign(digest: &[u8], key: &SecretKey, chain_id: Option<u64>) -> SignatureResult<Signature> {
    if digest.len() != 32 {
        return Err(SignatureError::InvalidDigestLength { len: digest.len() });
    }
    let signing_key = key.to_signing_key()?;
    let (sig, recid) = signing_key
        .sign_prehash_recoverable(digest)
        .map_err(|_| SignatureError::InvalidPrivateKey)?;

    // Low-s normalization flips the recovery parity when it rewrites s.
    let normalized = sig.normalize_s();
    let parity = if normalized.is_some() {
        recid.to_byte() ^ 1
    } else {
        recid.to_byte()
    };
    let sig = normalized.unwrap_or(sig);

    let bytes = sig.to_bytes();
    let r = U256::from_be_slice(&bytes[..32]);
    let s = U256::from_be_slice(&bytes[32..]);
    let v = encode_v(parity, chain_id)?;
    Ok(Signature { v, r, s })
}

/// Recover the 64-byte uncompressed public key (`X ‖ Y`) that produced a
/// signature over a digest.
///
/// High-`s` input is normalized before recovery; this is the EIP-2 choice
/// made here once so that callers never see a parity mismatch.
///
/// # Errors
///
/// - [`SignatureError::InvalidDigestLength`] unless the digest is 32 bytes.
/// - [`SignatureError::MalformedSignature`] when `r` or `s` is out of range.
/// - [`SignatureError::InvalidRecoveryId`] when `(v, chain_id)` matches no
///   encoding.
/// - [`SignatureError::RecoveryFailed`] when no curve point fits; the
///   signature is forged or corrupt.
pub fn recover_public_key(
    digest: &[u8],
    signature: &Signature,
    chain_id: Option<u64>,
) -> SignatureResult<[u8; 64]> {
    if digest.len() != 32 {
        return Err(SignatureError::InvalidDigestLength { len: digest.len() });
    }
    if !signature.is_valid() {
        return Err(SignatureError::MalformedSignature);
    }
    let signature = signature.normalized();
    let parity = signature.recovery_parity(chain_id)?;

    let r_bytes: [u8; 32] = signature.r.to_be_bytes::<32>();
    let s_bytes: [u8; 32] = signature.s.to_be_bytes::<32>();
    let sig = EcdsaSignature::from_scalars(r_bytes, s_bytes)
        .map_err(|_| SignatureError::MalformedSignature)?;
    let recid = RecoveryId::from_byte(parity).ok_or(SignatureError::RecoveryFailed)?;

    let verifying_key = VerifyingKey::recover_from_prehash(digest, &sig, recid)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    let point = verifying_key.to_encoded_point(false);
    let mut out = [0u8; 64];
    out.copy_from_slice(&point.as_bytes()[1..]);
    Ok(out)
}

/// Recover the 20-byte sender address behind a signature over a digest.
///
/// # Errors
///
/// Same failure modes as [`recover_public_key`].
pub fn recover_address(
    digest: &[u8],
    signature: &Signature,
    chain_id: Option<u64>,
) -> SignatureResult<Address> {
    let key = recover_public_key(digest, signature, chain_id)?;
    address_from_public_key(&key)
}

/// Return the low-`s` form of a signature. See [`Signature::normalized`].
#[must_use]
pub fn normalize_signature(signature: &Signature) -> Signature {
    signature.normalized()
}

/// Whether both signature scalars are in `[1, n - 1]`.
#[must_use]
pub fn is_valid_signature(signature: &Signature) -> bool {
    signature.is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keccak256;

    /// The worked example from the replay-protection EIP: key, signing
    /// digest, and the exact deterministic signature.
    const EXAMPLE_KEY: [u8; 32] = [0x46; 32];
    const EXAMPLE_DIGEST: &str = "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53";
    const EXAMPLE_R: &str = "28ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276";
    const EXAMPLE_S: &str = "67cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83";
    const EXAMPLE_SENDER: &str = "9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f";

    fn example_digest() -> [u8; 32] {
        let mut out = [0u8; 32];
        hex::decode_to_slice(EXAMPLE_DIGEST, &mut out).unwrap();
        out
    }

    fn u256_from_hex(s: &str) -> U256 {
        let mut out = [0u8; 32];
        hex::decode_to_slice(s, &mut out).unwrap();
        U256::from_be_slice(&out)
    }

    // ------------------------------------------------------------------------
    // Deterministic signing vector
    // ------------------------------------------------------------------------

    #[test]
    fn test_sign_matches_reference_vector() {
        let key = SecretKey::new(EXAMPLE_KEY);
        let sig = sign(&example_digest(), &key, Some(1)).unwrap();

        assert_eq!(sig.v, 37);
        assert_eq!(sig.r, u256_from_hex(EXAMPLE_R));
        assert_eq!(sig.s, u256_from_hex(EXAMPLE_S));
    }

    #[test]
    fn test_sign_without_chain_id_uses_27_28() {
        let key = SecretKey::new(EXAMPLE_KEY);
        let sig = sign(&example_digest(), &key, None).unwrap();
        assert!(sig.v == 27 || sig.v == 28);
        // Same scalars either way; only v differs.
        assert_eq!(sig.r, u256_from_hex(EXAMPLE_R));
    }

    #[test]
    fn test_recover_reference_sender() {
        let sig = Signature::new(37, u256_from_hex(EXAMPLE_R), u256_from_hex(EXAMPLE_S));
        let addr = recover_address(&example_digest(), &sig, Some(1)).unwrap();
        assert_eq!(hex::encode(addr), EXAMPLE_SENDER);
    }

    #[test]
    fn test_sign_recover_roundtrip_across_chain_ids() {
        let digest = keccak256(b"roundtrip");
        for chain_id in [None, Some(1), Some(5), Some(17000), Some(11_155_111)] {
            let key = SecretKey::generate();
            let expected = {
                let signing = key.to_signing_key().unwrap();
                let point = signing.verifying_key().to_encoded_point(false);
                address_from_public_key(point.as_bytes()).unwrap()
            };
            let sig = sign(digest.as_slice(), &key, chain_id).unwrap();
            let recovered = recover_address(digest.as_slice(), &sig, chain_id).unwrap();
            assert_eq!(recovered, expected, "chain_id {chain_id:?}");
        }
    }

    // ------------------------------------------------------------------------
    // Recovery id arithmetic
    // ------------------------------------------------------------------------

    #[test]
    fn test_recovery_parity_total_match() {
        assert_eq!(recovery_parity(0, None).unwrap(), 0);
        assert_eq!(recovery_parity(1, None).unwrap(), 1);
        assert_eq!(recovery_parity(27, None).unwrap(), 0);
        assert_eq!(recovery_parity(28, None).unwrap(), 1);
        assert_eq!(recovery_parity(37, Some(1)).unwrap(), 0);
        assert_eq!(recovery_parity(38, Some(1)).unwrap(), 1);
        // Holesky: 17000 * 2 + 35 = 34035.
        assert_eq!(recovery_parity(34035, Some(17000)).unwrap(), 0);
    }

    #[test]
    fn test_recovery_parity_rejects_everything_else() {
        for v in [2u64, 26, 29, 34] {
            assert!(matches!(
                recovery_parity(v, Some(1)),
                Err(SignatureError::InvalidRecoveryId { .. })
            ));
        }
        // v >= 35 with no chain id.
        assert!(recovery_parity(37, None).is_err());
        // Chain id mismatch: v=37 belongs to chain 1, not 2.
        assert!(recovery_parity(37, Some(2)).is_err());
        // Overflowing chain id.
        assert!(recovery_parity(u64::MAX, Some(u64::MAX)).is_err());
    }

    #[test]
    fn test_encode_v() {
        assert_eq!(encode_v(0, None).unwrap(), 27);
        assert_eq!(encode_v(1, None).unwrap(), 28);
        assert_eq!(encode_v(0, Some(1)).unwrap(), 35 + 2);
        assert_eq!(encode_v(1, Some(11_155_111)).unwrap(), 11_155_111 * 2 + 36);
        assert!(encode_v(1, Some(u64::MAX)).is_err());
    }

    // ------------------------------------------------------------------------
    // Normalization
    // ------------------------------------------------------------------------

    #[test]
    fn test_normalize_flips_high_s_and_parity() {
        let sig = Signature::new(37, u256_from_hex(EXAMPLE_R), u256_from_hex(EXAMPLE_S));
        // Build the malleable twin: s' = n - s, parity flipped.
        let high = Signature::new(38, sig.r, SECP256K1_ORDER - sig.s);
        assert!(!high.is_low_s());

        let normalized = high.normalized();
        assert_eq!(normalized, sig);
        // Idempotent.
        assert_eq!(normalized.normalized(), normalized);
    }

    #[test]
    fn test_normalize_preserves_recovered_address() {
        let sig = Signature::new(37, u256_from_hex(EXAMPLE_R), u256_from_hex(EXAMPLE_S));
        let high = Signature::new(38, sig.r, SECP256K1_ORDER - sig.s);

        let from_high = recover_address(&example_digest(), &high, Some(1)).unwrap();
        assert_eq!(hex::encode(from_high), EXAMPLE_SENDER);
    }

    #[test]
    fn test_normalize_handles_each_v_family() {
        let r = U256::from(1u64);
        let high_s = SECP256K1_ORDER - U256::from(1u64);
        for (v, flipped) in [(0u64, 1u64), (1, 0), (27, 28), (28, 27), (35, 36), (38, 37)] {
            let out = Signature::new(v, r, high_s).normalized();
            assert_eq!(out.v, flipped, "v={v}");
            assert_eq!(out.s, U256::from(1u64));
        }
    }

    // ------------------------------------------------------------------------
    // Validity and failure modes
    // ------------------------------------------------------------------------

    #[test]
    fn test_is_valid_ranges() {
        let one = U256::from(1u64);
        assert!(Signature::new(27, one, one).is_valid());
        assert!(!Signature::new(27, U256::ZERO, one).is_valid());
        assert!(!Signature::new(27, one, U256::ZERO).is_valid());
        assert!(!Signature::new(27, SECP256K1_ORDER, one).is_valid());
        let below = SECP256K1_ORDER - one;
        assert!(Signature::new(27, below, below).is_valid());
    }

    #[test]
    fn test_recover_rejects_bad_digest_length() {
        let sig = Signature::new(27, U256::from(1u64), U256::from(1u64));
        assert_eq!(
            recover_public_key(&[0u8; 31], &sig, None).unwrap_err(),
            SignatureError::InvalidDigestLength { len: 31 }
        );
    }

    #[test]
    fn test_recover_rejects_out_of_range_scalars() {
        let sig = Signature::new(27, U256::ZERO, U256::from(1u64));
        assert_eq!(
            recover_public_key(&[0u8; 32], &sig, None).unwrap_err(),
            SignatureError::MalformedSignature
        );
    }

    #[test]
    fn test_recover_fails_on_forged_signature() {
        // Valid-range scalars that correspond to no curve point for this
        // digest either fail recovery or recover a different key.
        let digest = keccak256(b"forged");
        let sig = Signature::new(27, U256::from(7u64), U256::from(9u64));
        match recover_address(digest.as_slice(), &sig, None) {
            Err(SignatureError::RecoveryFailed) => {}
            Ok(addr) => assert_ne!(addr, Address::ZERO),
            Err(other) => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_sign_rejects_bad_digest_and_key() {
        let key = SecretKey::new(EXAMPLE_KEY);
        assert_eq!(
            sign(&[0u8; 16], &key, None).unwrap_err(),
            SignatureError::InvalidDigestLength { len: 16 }
        );
        let zero = SecretKey::new([0u8; 32]);
        assert_eq!(
            sign(&[0u8; 32], &zero, None).unwrap_err(),
            SignatureError::InvalidPrivateKey
        );
    }
}
