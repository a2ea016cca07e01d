//! # txwire-rlp
//!
//! Canonical recursive-length-prefix codec.
//!
//! This crate owns the length-prefix grammar the whole transaction codec
//! rests on: a byte below `0x80` encodes itself, short strings and lists
//! carry their length in the prefix byte (`0x80` / `0xc0` pivots), and long
//! forms (`0xb7` / `0xf7` pivots) prefix a minimal big-endian length. The
//! decoder is a bijection with the canonical byte strings in its image:
//! anything [`decode`] accepts, [`encode`] reproduces byte for byte, and
//! every non-minimal spelling is rejected with a typed error.
//!
//! ## Example
//!
//! ```rust
//! use txwire_rlp::{decode, encode, Item};
//!
//! let item = Item::list(vec![Item::from_u64(1024), Item::bytes(b"dog".to_vec())]);
//! let bytes = encode(&item);
//! assert_eq!(bytes, vec![0xc7, 0x82, 0x04, 0x00, 0x83, b'd', b'o', b'g']);
//! assert_eq!(decode(&bytes).unwrap(), item);
//! ```
//!
//! ## Resource bounds
//!
//! Declared lengths are validated against the remaining input before any
//! allocation, and nesting is capped at [`MAX_DEPTH`]; memory for a decoded
//! item is linear in the input size.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod decode;
mod encode;
mod fields;
mod item;

pub use decode::{decode, decode_prefix, MAX_DEPTH};
pub use encode::{encode, encode_into};
pub use fields::{
    item_address, item_b256, item_bytes, item_list, item_optional_address, item_u256, item_u64,
};
pub use item::Item;

// Re-export the grammar error for downstream match arms.
pub use txwire_core::{RlpError, RlpResult};
