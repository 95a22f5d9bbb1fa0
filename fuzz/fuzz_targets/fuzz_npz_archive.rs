#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // A bare .npy member must decode or fail, never panic
    let _ = trajflat::archive::FieldArray::decode(data);

    // Same for a whole archive, including shape validation
    let _ = trajflat::archive::Archive::from_reader("fuzz", Cursor::new(data));
});
