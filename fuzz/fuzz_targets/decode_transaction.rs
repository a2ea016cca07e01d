//! Fuzz target for the transaction decoder.
//!
//! Exercises envelope dispatch and every field parser with arbitrary byte
//! sequences. Two things must hold on every input: the decoder returns a
//! transaction or a typed error (never panics), and anything it accepts
//! re-encodes to the identical bytes.
//!
//! # Running
//!
//! ```bash
//! cargo +nightly fuzz run decode_transaction
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use txwire::{decode_transaction, encode_transaction};

fuzz_target!(|data: &[u8]| {
    if let Ok(tx) = decode_transaction(data) {
        let reencoded = encode_transaction(&tx);
        assert_eq!(
            reencoded, data,
            "accepted input must re-encode byte-identically"
        );
    }
});
