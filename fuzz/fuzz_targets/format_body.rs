#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&flag, rest)) = data.split_first() else {
        return;
    };
    let body = String::from_utf8_lossy(rest);
    let line = restpoll::fuzzing::format_body_input(&body, flag % 2 == 0);
    debug_assert!(!line.contains('\n'));
    debug_assert!(!line.contains('\r'));
});
