#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok((name, value)) = restpoll::fuzzing::parse_header_input(input) {
            debug_assert!(!name.is_empty());
            debug_assert_eq!(name, name.trim());
            debug_assert!(input.ends_with(value.as_str()));
        }
    }
});
