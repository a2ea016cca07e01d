//! Encoder producing the unique canonical byte sequence for an item.

use crate::Item;

/// Encode an item to its canonical byte sequence.
///
/// This is the inverse of [`crate::decode`]: every output of `encode`
/// decodes back to the same item, and every accepted input re-encodes to
/// itself.
///
/// # Example
///
/// ```rust
/// use txwire_rlp::{encode, Item};
///
/// assert_eq!(encode(&Item::bytes(b"dog".to_vec())), vec![0x83, b'd', b'o', b'g']);
/// assert_eq!(encode(&Item::empty_bytes()), vec![0x80]);
/// assert_eq!(encode(&Item::empty_list()), vec![0xc0]);
/// ```
#[must_use]
pub fn encode(item: &Item) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(item, &mut out);
    out
}

/// Encode an item, appending to an existing buffer.
pub fn encode_into(item: &Item, out: &mut Vec<u8>) {
    match item {
        Item::Bytes(bytes) => {
            if bytes.len() == 1 && bytes[0] < 0x80 {
                out.push(bytes[0]);
            } else {
                encode_header(bytes.len(), 0x80, out);
                out.extend_from_slice(bytes);
            }
        }
        Item::List(items) => {
            let mut body = Vec::new();
            for child in items {
                encode_into(child, &mut body);
            }
            encode_header(body.len(), 0xc0, out);
            out.extend_from_slice(&body);
        }
    }
}

/// Emit a string (`0x80`) or list (`0xc0`) header for a payload length.
fn encode_header(len: usize, offset: u8, out: &mut Vec<u8>) {
    if len <= 55 {
        // Payload length fits the prefix byte itself.
        #[allow(clippy::cast_possible_truncation)]
        out.push(offset + len as u8);
    } else {
        let be = len.to_be_bytes();
        let skip = be.iter().take_while(|&&b| b == 0).count();
        let len_bytes = &be[skip..];
        #[allow(clippy::cast_possible_truncation)]
        out.push(offset + 55 + len_bytes.len() as u8);
        out.extend_from_slice(len_bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;

    #[test]
    fn test_encode_known_vectors() {
        assert_eq!(encode(&Item::empty_bytes()), vec![0x80]);
        assert_eq!(encode(&Item::Bytes(vec![0x7f])), vec![0x7f]);
        assert_eq!(encode(&Item::Bytes(vec![0x80])), vec![0x81, 0x80]);
        assert_eq!(encode(&Item::bytes(b"dog".to_vec())), vec![0x83, 0x64, 0x6f, 0x67]);
        assert_eq!(encode(&Item::empty_list()), vec![0xc0]);
        assert_eq!(
            encode(&Item::list(vec![
                Item::bytes(b"cat".to_vec()),
                Item::bytes(b"dog".to_vec())
            ])),
            vec![0xc8, 0x83, 0x63, 0x61, 0x74, 0x83, 0x64, 0x6f, 0x67]
        );
    }

    #[test]
    fn test_encode_integers() {
        // Zero is the empty string, and 1024 keeps big-endian order.
        assert_eq!(encode(&Item::from_u64(0)), vec![0x80]);
        assert_eq!(encode(&Item::from_u64(128)), vec![0x81, 0x80]);
        assert_eq!(encode(&Item::from_u64(1024)), vec![0x82, 0x04, 0x00]);
    }

    #[test]
    fn test_encode_long_string_header() {
        let item = Item::Bytes(vec![0x61; 56]);
        let out = encode(&item);
        assert_eq!(out[0], 0xb8);
        assert_eq!(out[1], 56);
        assert_eq!(out.len(), 58);
    }

    #[test]
    fn test_encode_boundary_55_bytes_stays_short_form() {
        let item = Item::Bytes(vec![0x61; 55]);
        let out = encode(&item);
        assert_eq!(out[0], 0x80 + 55);
        assert_eq!(out.len(), 56);
    }

    #[test]
    fn test_encode_long_list_header() {
        // 19 three-byte strings: 76-byte body needs the long form.
        let items = vec![Item::bytes(b"dog".to_vec()); 19];
        let out = encode(&Item::list(items));
        assert_eq!(out[0], 0xf8);
        assert_eq!(out[1], 76);
    }

    #[test]
    fn test_roundtrip_through_decoder() {
        let samples = [
            Item::empty_bytes(),
            Item::empty_list(),
            Item::Bytes(vec![0x00]),
            Item::Bytes(vec![0x80; 300]),
            Item::list(vec![
                Item::from_u64(21000),
                Item::list(vec![Item::bytes(b"nested".to_vec())]),
                Item::empty_bytes(),
            ]),
        ];
        for item in samples {
            let encoded = encode(&item);
            assert_eq!(decode(&encoded).unwrap(), item);
        }
    }
}
