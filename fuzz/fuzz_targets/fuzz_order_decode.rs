//! Fuzz target: order and passenger decoding.

#![no_main]

use libfuzzer_sys::fuzz_target;
use railbook_core::{Order, Passenger};

fuzz_target!(|data: &[u8]| {
    let _ = serde_json::from_slice::<Order>(data);
    let _ = serde_json::from_slice::<Passenger>(data);
});
