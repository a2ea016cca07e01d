//! # txwire-tx
//!
//! Typed Ethereum transaction envelopes: decode, encode, hash, recover.
//!
//! Raw bytes go in, a [`Transaction`] comes out, and re-encoding gives the
//! original bytes back bit for bit. Five envelopes are understood:
//!
//! | First byte | Variant | Introduced by |
//! |---|---|---|
//! | `0xc0..=0xff` | [`Transaction::Legacy`] | the original wire format |
//! | `0x01` | [`Transaction::AccessList`] | EIP-2930 |
//! | `0x02` | [`Transaction::DynamicFee`] | EIP-1559 |
//! | `0x03` | [`Transaction::Blob`] | EIP-4844 |
//! | `0x04` | [`Transaction::SetCode`] | EIP-7702 |
//!
//! ## Example
//!
//! ```rust
//! use txwire_tx::{decode_transaction, encode_transaction};
//!
//! // The worked example from the replay-protection EIP.
//! let raw = hex::decode(
//!     "f86c098504a817c800825208943535353535353535353535353535353535353535\
//!      880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c\
//!      71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc\
//!      64214b297fb1966a3b6d83",
//! )
//! .unwrap();
//!
//! let tx = decode_transaction(&raw).unwrap();
//! assert_eq!(tx.chain_id(), Some(1));
//! assert_eq!(
//!     hex::encode(tx.recover_sender().unwrap()),
//!     "9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f"
//! );
//! assert_eq!(encode_transaction(&tx), raw);
//! ```
//!
//! ## Concurrency
//!
//! Everything is pure: inputs by value or borrowed slice, outputs fresh.
//! Decode, sign, and recover from as many threads as you like.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod codec;
mod signing;
mod types;

pub use codec::{decode_transaction, encode_transaction};
pub use signing::{signing_hash, transaction_hash};
pub use types::{
    AccessListEntry, AccessListTx, Authorization, BlobTx, DynamicFeeTx, LegacyTx, SetCodeTx,
    Transaction,
};

// Re-export the error kinds callers match on.
pub use txwire_core::{DecodeError, DecodeResult, SignatureError, SignatureResult};
