//! # txwire-core
//!
//! Error taxonomy and result aliases shared across the `txwire` crates.
//!
//! ## Internal Crate Warning
//!
//! **This crate is an internal implementation detail of `txwire`.**
//!
//! It is published only because Cargo requires all dependencies to be
//! published. The API is **unstable** and may change without notice between
//! any versions, including patch releases. Depend on `txwire` instead.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//!
//! ## Error Handling
//!
//! Each fallible domain has its own enum, and [`TxWireError`] wraps them
//! all:
//!
//! ```rust
//! use txwire_core::error::{DecodeError, TxWireError};
//!
//! let err: TxWireError = DecodeError::UnknownEnvelope { type_byte: 0x7f }.into();
//! assert!(matches!(err, TxWireError::Decode(_)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;

// Re-export commonly used error types at crate root for convenience
pub use error::{
    DecodeError, DecodeResult, Result, RlpError, RlpResult, SignatureError, SignatureResult,
    TxWireError,
};
