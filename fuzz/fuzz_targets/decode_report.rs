#![no_main]

use codec::{decode_from_slice, encode_to_vec, Scheme, UpgradeStatusReport, WireLimits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = WireLimits::for_testing();
    for scheme in Scheme::ALL {
        let Ok(report) = decode_from_slice::<UpgradeStatusReport>(data, scheme, &limits) else {
            continue;
        };
        // Anything that decodes must survive a round trip unchanged.
        let bytes = encode_to_vec(&report, scheme).expect("decoded record encodes");
        let again = decode_from_slice::<UpgradeStatusReport>(&bytes, scheme, &limits)
            .expect("re-encoded record decodes");
        assert_eq!(again, report);
    }
});
