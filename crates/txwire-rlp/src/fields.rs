//! Field-level readers over decoded items.
//!
//! The transaction codec works field by field over the items of an
//! envelope's list. These helpers convert a single [`Item`] into the typed
//! field values, enforcing the integer rules of the wire format: minimal
//! big-endian, no leading zero byte, zero encoded as the empty string.

use alloy_primitives::{Address, B256, U256};
use txwire_core::{RlpError, RlpResult};

use crate::Item;

/// Read a `u64` from its minimal big-endian byte string.
///
/// # Errors
///
/// - [`RlpError::ExpectedString`] if the item is a list.
/// - [`RlpError::NonCanonicalInteger`] on a leading zero byte.
/// - [`RlpError::IntegerOverflow`] if more than eight bytes are present.
pub fn item_u64(item: &Item) -> RlpResult<u64> {
    let bytes = integer_bytes(item)?;
    if bytes.len() > 8 {
        return Err(RlpError::IntegerOverflow { width: 64 });
    }
    let mut value: u64 = 0;
    for &b in bytes {
        value = (value << 8) | u64::from(b);
    }
    Ok(value)
}

/// Read a `U256` from its minimal big-endian byte string.
///
/// # Errors
///
/// - [`RlpError::ExpectedString`] if the item is a list.
/// - [`RlpError::NonCanonicalInteger`] on a leading zero byte.
/// - [`RlpError::IntegerOverflow`] if more than 32 bytes are present.
pub fn item_u256(item: &Item) -> RlpResult<U256> {
    let bytes = integer_bytes(item)?;
    if bytes.len() > 32 {
        return Err(RlpError::IntegerOverflow { width: 256 });
    }
    Ok(U256::from_be_slice(bytes))
}

/// Read an arbitrary byte string (the `data` field).
///
/// # Errors
///
/// [`RlpError::ExpectedString`] if the item is a list.
pub fn item_bytes(item: &Item) -> RlpResult<Vec<u8>> {
    item.as_bytes().map(<[u8]>::to_vec)
}

/// Read a 20-byte address.
///
/// # Errors
///
/// [`RlpError::UnexpectedLength`] unless exactly twenty bytes are present.
pub fn item_address(item: &Item) -> RlpResult<Address> {
    let bytes = item.as_bytes()?;
    if bytes.len() != 20 {
        return Err(RlpError::UnexpectedLength {
            expected: 20,
            got: bytes.len(),
        });
    }
    Ok(Address::from_slice(bytes))
}

/// Read an address that may be absent.
///
/// The empty byte string is the contract-creation form of the `to` field
/// and maps to `None`; twenty bytes map to `Some`; anything else is an
/// error. Twenty zero bytes are a real address, not absence.
///
/// # Errors
///
/// [`RlpError::UnexpectedLength`] for any other byte count.
pub fn item_optional_address(item: &Item) -> RlpResult<Option<Address>> {
    let bytes = item.as_bytes()?;
    if bytes.is_empty() {
        return Ok(None);
    }
    item_address(item).map(Some)
}

/// Read a 32-byte value (storage keys, versioned hashes).
///
/// # Errors
///
/// [`RlpError::UnexpectedLength`] unless exactly 32 bytes are present.
pub fn item_b256(item: &Item) -> RlpResult<B256> {
    let bytes = item.as_bytes()?;
    if bytes.len() != 32 {
        return Err(RlpError::UnexpectedLength {
            expected: 32,
            got: bytes.len(),
        });
    }
    Ok(B256::from_slice(bytes))
}

/// View an item as a list of items.
///
/// # Errors
///
/// [`RlpError::ExpectedList`] if the item is a byte string.
pub fn item_list(item: &Item) -> RlpResult<&[Item]> {
    item.as_list()
}

/// Integer byte-string view with the leading-zero check applied.
fn integer_bytes(item: &Item) -> RlpResult<&[u8]> {
    let bytes = item.as_bytes()?;
    if bytes.first() == Some(&0) {
        return Err(RlpError::NonCanonicalInteger);
    }
    Ok(bytes)
}
