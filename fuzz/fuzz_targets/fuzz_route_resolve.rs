//! Fuzz target: page route resolution.
//!
//! Any UTF-8 path resolves to a route (the catch-all guarantees one)
//! within the redirect bound.

#![no_main]

use libfuzzer_sys::fuzz_target;
use railbook_core::ROUTES;

fuzz_target!(|data: &[u8]| {
    let Ok(path) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(resolved) = ROUTES.resolve(path) {
        assert!(resolved.redirects <= railbook_core::routes::MAX_REDIRECTS);
        assert!(resolved.route.document_title().ends_with("火车订票系统"));
    }
});
