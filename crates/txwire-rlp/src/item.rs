//! The decoded form of a length-prefixed value.
//!
//! An [`Item`] is either a terminal byte string or an ordered sequence of
//! items. Integers, addresses, and hashes all reduce to byte strings on the
//! wire; the constructors here produce the canonical byte-string form for
//! each of them so that re-encoding a decoded transaction reproduces the
//! input bit for bit.

use alloy_primitives::{Address, B256, U256};

/// A single value in the length-prefix grammar.
///
/// # Example
///
/// ```rust
/// use txwire_rlp::Item;
///
/// let item = Item::list(vec![Item::bytes(b"cat".to_vec()), Item::bytes(b"dog".to_vec())]);
/// assert!(item.is_list());
/// assert_eq!(item.as_list().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// A terminal byte string.
    Bytes(Vec<u8>),
    /// An ordered sequence of items.
    List(Vec<Item>),
}

impl Item {
    /// Create a byte-string item.
    #[must_use]
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Create a list item.
    #[must_use]
    pub const fn list(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    /// The empty byte string.
    ///
    /// Encodes to `0x80`; denotes the integer zero or an absent address.
    #[must_use]
    pub const fn empty_bytes() -> Self {
        Self::Bytes(Vec::new())
    }

    /// The empty list.
    ///
    /// Encodes to `0xc0`. Distinct from [`Item::empty_bytes`]: the EIP-7702
    /// nonce field relies on that distinction.
    #[must_use]
    pub const fn empty_list() -> Self {
        Self::List(Vec::new())
    }

    /// Encode a `u64` as its minimal big-endian byte string.
    ///
    /// Zero becomes the empty string; leading zero bytes are stripped.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        let be = value.to_be_bytes();
        let skip = be.iter().take_while(|&&b| b == 0).count();
        Self::Bytes(be[skip..].to_vec())
    }

    /// Encode a `U256` as its minimal big-endian byte string.
    #[must_use]
    pub fn from_u256(value: &U256) -> Self {
        Self::Bytes(value.to_be_bytes_trimmed_vec())
    }

    /// Encode a 20-byte address.
    #[must_use]
    pub fn from_address(address: &Address) -> Self {
        Self::Bytes(address.as_slice().to_vec())
    }

    /// Encode an optional address: `None` is the empty byte string, the
    /// contract-creation form of the `to` field.
    #[must_use]
    pub fn from_optional_address(address: Option<&Address>) -> Self {
        match address {
            Some(addr) => Self::from_address(addr),
            None => Self::empty_bytes(),
        }
    }

    /// Encode a 32-byte hash.
    #[must_use]
    pub fn from_b256(hash: &B256) -> Self {
        Self::Bytes(hash.as_slice().to_vec())
    }

    /// Whether this item is a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Whether this item is a byte string.
    #[must_use]
    pub const fn is_bytes(&self) -> bool {
        matches!(self, Self::Bytes(_))
    }

    /// View this item as a byte string.
    ///
    /// # Errors
    ///
    /// Returns [`RlpError::ExpectedString`](txwire_core::RlpError::ExpectedString)
    /// if the item is a list.
    pub fn as_bytes(&self) -> txwire_core::RlpResult<&[u8]> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            Self::List(_) => Err(txwire_core::RlpError::ExpectedString),
        }
    }

    /// View this item as a list.
    ///
    /// # Errors
    ///
    /// Returns [`RlpError::ExpectedList`](txwire_core::RlpError::ExpectedList)
    /// if the item is a byte string.
    pub fn as_list(&self) -> txwire_core::RlpResult<&[Self]> {
        match self {
            Self::List(items) => Ok(items),
            Self::Bytes(_) => Err(txwire_core::RlpError::ExpectedList),
        }
    }
}
