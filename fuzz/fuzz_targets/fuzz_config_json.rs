//! Fuzz target: configuration parsing
//!
//! Feeds arbitrary bytes to `MonitorConfig::from_json` and verifies:
//! - No panics under malformed JSON
//! - Anything accepted also passes `validate`
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use roomwatch::config::MonitorConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = MonitorConfig::from_json(json) {
        assert!(config.validate().is_ok());
    }
});
