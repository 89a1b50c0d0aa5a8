#![no_main]

use libfuzzer_sys::fuzz_target;
use depcheck_report::ScanResultMap;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let map = ScanResultMap::parse(input);
        // 모든 세그먼트는 엔트리이거나 진단 정보 중 하나
        let segments = input.split(';').filter(|s| !s.trim().is_empty()).count();
        assert!(map.len() + map.diagnostics().len() <= segments);
        for entry in map.entries() {
            assert!(!entry.artifact_key.contains('~'));
        }
    }
});
