#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use depcheck_report::parse_license_summary;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let entries = parse_license_summary(input);
        let unique: HashSet<_> = entries.iter().collect();
        assert_eq!(unique.len(), entries.len(), "summary must not repeat entries");
    }
});
