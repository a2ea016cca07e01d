//! Keccak-256 and the address utilities built on it.
//!
//! Ethereum uses the original Keccak submission, not NIST SHA-3-256; the
//! two differ by one padding byte, so [`keccak256`] of the empty input is
//! `c5d24601…85a470` rather than the SHA-3 value. Everything else in this
//! module is a thin layer over that digest: sender addresses are the last
//! twenty bytes of the hashed public key, and EIP-55 re-uses the digest of
//! the hex string itself as a per-character checksum.

use alloy_primitives::{Address, B256};
use sha3::{Digest, Keccak256};
use txwire_core::{SignatureError, SignatureResult};

/// Compute the Keccak-256 digest of the input.
///
/// # Example
///
/// ```rust
/// use txwire_crypto::keccak256;
///
/// let digest = keccak256([]);
/// assert_eq!(
///     hex::encode(digest),
///     "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
/// );
/// ```
#[must_use]
pub fn keccak256(data: impl AsRef<[u8]>) -> B256 {
    B256::from_slice(&Keccak256::digest(data.as_ref()))
}

/// Derive the 20-byte address from an uncompressed secp256k1 public key.
///
/// Accepts the 64-byte `X ‖ Y` body or the 65-byte SEC1 form with its
/// `0x04` sentinel. The address is the last twenty bytes of the Keccak-256
/// digest of the 64-byte body.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidPublicKey`] for any other length, or a
/// 65-byte key whose first byte is not `0x04`.
pub fn address_from_public_key(key: &[u8]) -> SignatureResult<Address> {
    let body = match key.len() {
        64 => key,
        65 if key[0] == 0x04 => &key[1..],
        _ => return Err(SignatureError::InvalidPublicKey),
    };
    let digest = keccak256(body);
    Ok(Address::from_slice(&digest[12..]))
}

/// Render an address in EIP-55 mixed-case form, `0x`-prefixed.
///
/// Each hex letter is uppercased iff the matching nibble of the Keccak-256
/// digest of the lowercase hex string is at least eight.
///
/// # Example
///
/// ```rust
/// use alloy_primitives::address;
/// use txwire_crypto::checksum_encode;
///
/// let addr = address!("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed");
/// assert_eq!(checksum_encode(&addr), "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
/// ```
#[must_use]
pub fn checksum_encode(address: &Address) -> String {
    let hex_addr = hex::encode(address.as_slice());
    let digest = keccak256(hex_addr.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in hex_addr.chars().enumerate() {
        if c.is_ascii_digit() {
            out.push(c);
        } else {
            let nibble = if i % 2 == 0 {
                digest[i / 2] >> 4
            } else {
                digest[i / 2] & 0x0f
            };
            if nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
    }
    out
}

/// Validate the case of a hex address string.
///
/// Accepts all-lowercase, all-uppercase, and an exact EIP-55 checksum
/// match, with or without the `0x` prefix. Any other mixed case, a length
/// other than forty hex characters, or a non-hex character is rejected.
#[must_use]
pub fn checksum_verify(address: &str) -> bool {
    let hex_part = address.strip_prefix("0x").unwrap_or(address);
    if hex_part.len() != 40 || !hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }

    let has_lower = hex_part.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex_part.bytes().any(|b| b.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return true;
    }

    // Mixed case: only the exact checksum spelling is acceptable.
    let lower = hex_part.to_ascii_lowercase();
    let mut bytes = [0u8; 20];
    if hex::decode_to_slice(&lower, &mut bytes).is_err() {
        return false;
    }
    checksum_encode(&Address::from(bytes))[2..] == *hex_part
}
