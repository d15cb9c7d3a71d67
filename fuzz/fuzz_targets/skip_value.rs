#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::{FieldType, Limits, ProtocolReader};

fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let Ok(ty) = FieldType::parse(first & 0x0F) else {
        return;
    };
    let mut reader = ProtocolReader::new(rest, &Limits::for_testing());
    let _ = reader.skip(ty);
    assert!(reader.position() <= rest.len());
});
