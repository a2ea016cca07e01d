//! Fuzz target for the length-prefix grammar.
//!
//! The decoder must be total on arbitrary bytes and a bijection on the
//! inputs it accepts: decode-then-encode reproduces the input exactly.
//!
//! # Running
//!
//! ```bash
//! cargo +nightly fuzz run rlp_decode
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use txwire::{rlp_decode, rlp_encode};

fuzz_target!(|data: &[u8]| {
    if let Ok(item) = rlp_decode(data) {
        assert_eq!(
            rlp_encode(&item),
            data,
            "accepted input must re-encode byte-identically"
        );
    }
});
