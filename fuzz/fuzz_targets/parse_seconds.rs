#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = restpoll::fuzzing::parse_interval_input(input);
        if let Ok(timeout) = restpoll::fuzzing::parse_timeout_input(input) {
            debug_assert!(!timeout.is_zero());
        }
    }
});
