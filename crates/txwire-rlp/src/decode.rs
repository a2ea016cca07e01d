//! Strict decoder for the length-prefix grammar.
//!
//! The decoder accepts exactly the canonical encodings and nothing else:
//! for every item there is one byte sequence that decodes to it, and
//! [`decode`] composed with [`crate::encode`] is the identity on that set.
//! Non-minimal prefixes, truncated payloads, oversize declared lengths, and
//! pathological nesting are all rejected with a typed [`RlpError`].
//!
//! Declared lengths are checked against the remaining input *before* any
//! slicing or allocation, so a five-byte input claiming a four-gigabyte
//! payload fails in constant time.

use txwire_core::{RlpError, RlpResult};

use crate::Item;

/// Maximum item nesting the decoder will follow.
///
/// Transaction payloads use at most four levels; anything deeper is a
/// crafted input.
pub const MAX_DEPTH: usize = 16;

/// Decode one item, requiring the input to be fully consumed.
///
/// # Errors
///
/// Any grammar violation, plus [`RlpError::TrailingBytes`] when a complete
/// item leaves input behind.
///
/// # Example
///
/// ```rust
/// use txwire_rlp::{decode, Item};
///
/// let item = decode(&[0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']).unwrap();
/// assert_eq!(
///     item,
///     Item::list(vec![Item::bytes(b"cat".to_vec()), Item::bytes(b"dog".to_vec())])
/// );
/// ```
pub fn decode(input: &[u8]) -> RlpResult<Item> {
    let (item, consumed) = decode_prefix(input)?;
    if consumed != input.len() {
        return Err(RlpError::TrailingBytes);
    }
    Ok(item)
}

/// Decode one item from the front of the input.
///
/// Returns the item and the number of bytes it occupied. Trailing bytes are
/// left for the caller.
///
/// # Errors
///
/// Returns an [`RlpError`] for any grammar violation.
pub fn decode_prefix(input: &[u8]) -> RlpResult<(Item, usize)> {
    let mut cursor = 0;
    let item = decode_at(input, &mut cursor, 0)?;
    Ok((item, cursor))
}

/// Decode the item starting at `cursor`, advancing it past the item.
fn decode_at(input: &[u8], cursor: &mut usize, depth: usize) -> RlpResult<Item> {
    let prefix = *input.get(*cursor).ok_or(RlpError::Truncated)?;
    *cursor += 1;

    match prefix {
        // A byte below 0x80 encodes itself.
        0x00..=0x7f => Ok(Item::Bytes(vec![prefix])),

        // Short string: 0x80 + length, up to 55 payload bytes.
        0x80..=0xb7 => {
            let len = (prefix - 0x80) as usize;
            let payload = take(input, cursor, len)?;
            if len == 1 && payload[0] < 0x80 {
                return Err(RlpError::non_canonical(
                    "single byte below 0x80 must encode as itself",
                ));
            }
            Ok(Item::Bytes(payload.to_vec()))
        }

        // Long string: 0xb7 + length-of-length, then the length, then payload.
        0xb8..=0xbf => {
            let len = decode_long_length(input, cursor, prefix - 0xb7)?;
            let payload = take(input, cursor, len)?;
            Ok(Item::Bytes(payload.to_vec()))
        }

        // Short list: 0xc0 + payload length.
        0xc0..=0xf7 => {
            let len = (prefix - 0xc0) as usize;
            let body = take(input, cursor, len)?;
            decode_list_body(body, depth).map(Item::List)
        }

        // Long list: 0xf7 + length-of-length.
        0xf8..=0xff => {
            let len = decode_long_length(input, cursor, prefix - 0xf7)?;
            let body = take(input, cursor, len)?;
            decode_list_body(body, depth).map(Item::List)
        }
    }
}

/// Decode the children of a list from its payload bytes.
fn decode_list_body(body: &[u8], depth: usize) -> RlpResult<Vec<Item>> {
    if depth >= MAX_DEPTH {
        return Err(RlpError::DepthExceeded { max: MAX_DEPTH });
    }
    let mut items = Vec::new();
    let mut cursor = 0;
    while cursor < body.len() {
        items.push(decode_at(body, &mut cursor, depth + 1)?);
    }
    Ok(items)
}

/// Decode a long-form length field and validate that the short form would
/// not have sufficed.
fn decode_long_length(input: &[u8], cursor: &mut usize, len_of_len: u8) -> RlpResult<usize> {
    let len_bytes = take(input, cursor, len_of_len as usize)?;
    if len_bytes.first() == Some(&0) {
        return Err(RlpError::non_canonical("length field has a leading zero"));
    }
    if len_bytes.len() > core::mem::size_of::<usize>() {
        // The declared length cannot fit in memory anyway.
        return Err(RlpError::Truncated);
    }
    let mut len: usize = 0;
    for &b in len_bytes {
        len = (len << 8) | b as usize;
    }
    if len <= 55 {
        return Err(RlpError::non_canonical(
            "long form used where the short form fits",
        ));
    }
    Ok(len)
}

/// Slice `len` bytes at `cursor`, checking the remaining input first.
fn take<'a>(input: &'a [u8], cursor: &mut usize, len: usize) -> RlpResult<&'a [u8]> {
    let end = cursor.checked_add(len).ok_or(RlpError::Truncated)?;
    let slice = input.get(*cursor..end).ok_or(RlpError::Truncated)?;
    *cursor = end;
    Ok(slice)
}
