#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(config) = restpoll::fuzzing::apply_config_from_toml(input) {
            debug_assert!(!config.timeout().is_zero());
            debug_assert!(matches!(config.url().scheme(), "http" | "https"));
        }
    }
});
