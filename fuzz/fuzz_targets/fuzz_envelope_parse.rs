//! Fuzz target: response body classification.
//!
//! Arbitrary bytes fed to `Body::parse` must either classify or return a
//! decode error, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use railbook_core::Body;

fuzz_target!(|data: &[u8]| {
    if let Ok(Body::Envelope(envelope)) = Body::parse(data) {
        let _ = envelope.is_success(&[railbook_core::SUCCESS_CODE]);
        assert!(!envelope.message_or_default().is_empty());
    }
});
