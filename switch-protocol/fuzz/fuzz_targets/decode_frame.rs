#![no_main]

use libfuzzer_sys::fuzz_target;
use switch_protocol::Frame;

fuzz_target!(|data: &[u8]| {
    if let Ok((consumed, frame)) = Frame::try_parse(data) {
        assert_eq!(frame.to_bytes(), &data[..consumed]);
    }
});
