//! Error types for the txwire codec.
//!
//! This module provides error types for all failure modes in the codec,
//! organized by domain:
//!
//! - [`RlpError`] - Length-prefix grammar violations
//! - [`DecodeError`] - Transaction decoding failures
//! - [`SignatureError`] - Signing and recovery failures
//! - [`TxWireError`] - Top-level error that wraps all error types
//!
//! Every error is recoverable by the caller: a decode error means the input
//! came from a bad peer and the frame should be dropped; a recovery error
//! means the signature does not check out. Nothing here warrants process
//! termination.
//!
//! # Example
//!
//! ```rust
//! use txwire_core::error::{DecodeError, TxWireError};
//!
//! fn reject(data: &[u8]) -> Result<(), TxWireError> {
//!     if data.is_empty() {
//!         return Err(DecodeError::Truncated.into());
//!     }
//!     Ok(())
//! }
//! ```

/// Top-level error type for the txwire codec.
///
/// Wraps the domain-specific error types and provides automatic conversion
/// via the `#[from]` attribute.
#[derive(Debug, thiserror::Error)]
pub enum TxWireError {
    /// The length-prefix grammar was violated.
    #[error("rlp error: {0}")]
    Rlp(#[from] RlpError),

    /// Transaction decoding failed.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A signing or recovery operation failed.
    #[error("signature error: {0}")]
    Signature(#[from] SignatureError),
}

// ============================================================================
// RlpError
// ============================================================================

/// Errors raised by the length-prefix grammar.
///
/// The decoder is strict: for every valid item there is exactly one byte
/// sequence that encodes it, and everything else is rejected with one of
/// the variants below.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RlpError {
    /// The input ended before the declared payload was complete.
    #[error("input ended before the declared payload")]
    Truncated,

    /// The encoding is valid for no item: a shorter form exists.
    #[error("non-canonical encoding: {context}")]
    NonCanonical {
        /// What made the encoding non-minimal.
        context: &'static str,
    },

    /// An integer field carries a leading zero byte.
    #[error("integer has a leading zero byte")]
    NonCanonicalInteger,

    /// An integer does not fit the requested machine width.
    #[error("integer does not fit in {width} bits")]
    IntegerOverflow {
        /// The requested width in bits.
        width: u32,
    },

    /// Item nesting exceeded the decoder's depth limit.
    #[error("nesting exceeds the maximum depth of {max}")]
    DepthExceeded {
        /// The configured maximum nesting depth.
        max: usize,
    },

    /// A byte string was expected but a list was found.
    #[error("expected a byte string, found a list")]
    ExpectedString,

    /// A list was expected but a byte string was found.
    #[error("expected a list, found a byte string")]
    ExpectedList,

    /// A complete item was decoded but input bytes remain.
    #[error("trailing bytes after a complete item")]
    TrailingBytes,

    /// A byte string had the wrong length for its target type.
    #[error("expected {expected} bytes, got {got}")]
    UnexpectedLength {
        /// The required byte length.
        expected: usize,
        /// The length actually present.
        got: usize,
    },
}

impl RlpError {
    /// Create a `NonCanonical` error with context.
    #[must_use]
    pub const fn non_canonical(context: &'static str) -> Self {
        Self::NonCanonical { context }
    }
}

// ============================================================================
// DecodeError
// ============================================================================

/// Errors that can occur while decoding a transaction envelope.
///
/// These all indicate bad peer input. The kinds partition cleanly so that
/// callers can score peers without string matching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input ended before the transaction was complete.
    #[error("transaction truncated")]
    Truncated,

    /// The payload violates the canonical length-prefix grammar.
    #[error("non-canonical rlp: {context}")]
    NonCanonicalRlp {
        /// What was being decoded when the violation surfaced.
        context: String,
    },

    /// An integer field carries a leading zero byte.
    #[error("non-canonical integer in field `{field}`")]
    NonCanonicalInteger {
        /// The transaction field at fault.
        field: &'static str,
    },

    /// The envelope's item count matches no known layout.
    #[error("wrong field count: expected {expected}, got {got}")]
    WrongFieldCount {
        /// The acceptable item counts for this envelope.
        expected: &'static str,
        /// The item count actually present.
        got: usize,
    },

    /// The leading byte selects no known envelope.
    #[error("unknown envelope type byte 0x{type_byte:02x}")]
    UnknownEnvelope {
        /// The offending first byte.
        type_byte: u8,
    },

    /// The signature fields are structurally invalid.
    #[error("malformed signature: {context}")]
    MalformedSignature {
        /// What is wrong with the signature fields.
        context: String,
    },

    /// An access list entry does not have the `(address, [key])` shape.
    #[error("invalid access list: {context}")]
    InvalidAccessList {
        /// What is wrong with the entry.
        context: String,
    },

    /// An authorization tuple does not have the six-field EIP-7702 shape.
    #[error("invalid authorization: {context}")]
    InvalidAuthorization {
        /// What is wrong with the tuple.
        context: String,
    },
}

impl DecodeError {
    /// Create a `NonCanonicalRlp` error with context.
    #[must_use]
    pub fn non_canonical_rlp(context: impl Into<String>) -> Self {
        Self::NonCanonicalRlp {
            context: context.into(),
        }
    }

    /// Create a `MalformedSignature` error with context.
    #[must_use]
    pub fn malformed_signature(context: impl Into<String>) -> Self {
        Self::MalformedSignature {
            context: context.into(),
        }
    }

    /// Create an `InvalidAccessList` error with context.
    #[must_use]
    pub fn invalid_access_list(context: impl Into<String>) -> Self {
        Self::InvalidAccessList {
            context: context.into(),
        }
    }

    /// Create an `InvalidAuthorization` error with context.
    #[must_use]
    pub fn invalid_authorization(context: impl Into<String>) -> Self {
        Self::InvalidAuthorization {
            context: context.into(),
        }
    }

    /// Attach a field name to a grammar-level error.
    ///
    /// `Truncated` and `NonCanonicalInteger` keep their kind so callers can
    /// still partition on them; everything else folds into
    /// `NonCanonicalRlp` with the field as context.
    #[must_use]
    pub fn from_rlp(err: RlpError, field: &'static str) -> Self {
        match err {
            RlpError::Truncated => Self::Truncated,
            RlpError::NonCanonicalInteger => Self::NonCanonicalInteger { field },
            other => Self::NonCanonicalRlp {
                context: format!("{field}: {other}"),
            },
        }
    }
}

impl From<RlpError> for DecodeError {
    fn from(err: RlpError) -> Self {
        match err {
            RlpError::Truncated => Self::Truncated,
            RlpError::NonCanonicalInteger => Self::NonCanonicalInteger { field: "integer" },
            other => Self::NonCanonicalRlp {
                context: other.to_string(),
            },
        }
    }
}

// ============================================================================
// SignatureError
// ============================================================================

/// Errors that can occur during signing or public-key recovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// The `(v, chain_id)` combination matches no recovery rule.
    #[error("invalid recovery id: v={v}")]
    InvalidRecoveryId {
        /// The `v` value that matched no rule.
        v: u64,
    },

    /// The curve point could not be recovered; the signature is forged or
    /// corrupt.
    #[error("public key recovery failed")]
    RecoveryFailed,

    /// The signature components are out of range for the curve.
    #[error("malformed signature components")]
    MalformedSignature,

    /// The private key is not a valid secp256k1 scalar.
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// The digest is not exactly 32 bytes.
    #[error("invalid digest length: {len}")]
    InvalidDigestLength {
        /// The digest length actually supplied.
        len: usize,
    },

    /// The public key is not 64 bytes, or 65 bytes with the `0x04` sentinel.
    #[error("invalid public key encoding")]
    InvalidPublicKey,
}

// ============================================================================
// Result type aliases
// ============================================================================

/// A `Result` type alias using [`TxWireError`] as the error type.
pub type Result<T> = std::result::Result<T, TxWireError>;

/// A `Result` type alias for grammar-level operations.
pub type RlpResult<T> = std::result::Result<T, RlpError>;

/// A `Result` type alias for transaction decoding.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// A `Result` type alias for signing and recovery.
pub type SignatureResult<T> = std::result::Result<T, SignatureError>;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txwire_error_from_rlp_error() {
        let err: TxWireError = RlpError::Truncated.into();
        assert!(matches!(err, TxWireError::Rlp(RlpError::Truncated)));
        assert_eq!(
            err.to_string(),
            "rlp error: input ended before the declared payload"
        );
    }

    #[test]
    fn test_txwire_error_from_decode_error() {
        let err: TxWireError = DecodeError::UnknownEnvelope { type_byte: 0x05 }.into();
        assert_eq!(err.to_string(), "decode error: unknown envelope type byte 0x05");
    }

    #[test]
    fn test_txwire_error_from_signature_error() {
        let err: TxWireError = SignatureError::RecoveryFailed.into();
        assert_eq!(err.to_string(), "signature error: public key recovery failed");
    }

    #[test]
    fn test_rlp_error_display() {
        assert_eq!(
            RlpError::non_canonical("single byte below 0x80 wrapped in a string header")
                .to_string(),
            "non-canonical encoding: single byte below 0x80 wrapped in a string header"
        );
        assert_eq!(
            RlpError::IntegerOverflow { width: 64 }.to_string(),
            "integer does not fit in 64 bits"
        );
        assert_eq!(
            RlpError::DepthExceeded { max: 16 }.to_string(),
            "nesting exceeds the maximum depth of 16"
        );
        assert_eq!(
            RlpError::UnexpectedLength {
                expected: 20,
                got: 19
            }
            .to_string(),
            "expected 20 bytes, got 19"
        );
    }

    #[test]
    fn test_decode_error_from_rlp_preserves_truncation() {
        let err = DecodeError::from_rlp(RlpError::Truncated, "value");
        assert!(matches!(err, DecodeError::Truncated));
    }

    #[test]
    fn test_decode_error_from_rlp_tags_integer_field() {
        let err = DecodeError::from_rlp(RlpError::NonCanonicalInteger, "nonce");
        assert!(matches!(
            err,
            DecodeError::NonCanonicalInteger { field: "nonce" }
        ));
        assert_eq!(err.to_string(), "non-canonical integer in field `nonce`");
    }

    #[test]
    fn test_decode_error_from_rlp_folds_grammar_errors() {
        let err = DecodeError::from_rlp(RlpError::ExpectedString, "data");
        assert!(matches!(err, DecodeError::NonCanonicalRlp { .. }));
        assert_eq!(
            err.to_string(),
            "non-canonical rlp: data: expected a byte string, found a list"
        );
    }

    #[test]
    fn test_decode_error_constructors() {
        let err = DecodeError::malformed_signature("r is zero");
        assert!(matches!(err, DecodeError::MalformedSignature { context } if context == "r is zero"));

        let err = DecodeError::invalid_access_list("entry is not a pair");
        assert!(
            matches!(err, DecodeError::InvalidAccessList { context } if context == "entry is not a pair")
        );

        let err = DecodeError::invalid_authorization("nonce list has 2 items");
        assert!(
            matches!(err, DecodeError::InvalidAuthorization { context } if context == "nonce list has 2 items")
        );
    }

    #[test]
    fn test_signature_error_display() {
        assert_eq!(
            SignatureError::InvalidRecoveryId { v: 29 }.to_string(),
            "invalid recovery id: v=29"
        );
        assert_eq!(
            SignatureError::InvalidDigestLength { len: 31 }.to_string(),
            "invalid digest length: 31"
        );
    }

    #[test]
    fn test_errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TxWireError>();
        assert_send_sync::<RlpError>();
        assert_send_sync::<DecodeError>();
        assert_send_sync::<SignatureError>();
    }
}
