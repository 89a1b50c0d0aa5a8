#![no_main]

use libfuzzer_sys::fuzz_target;
use depcheck_allowlist::{DependencyDocument, LicenseDocument, XmlDocument};

fuzz_target!(|data: &[u8]| {
    if let Ok(xml) = std::str::from_utf8(data) {
        // 파싱에 성공한 문서는 다시 쓸 수 있어야 함
        if let Ok(doc) = DependencyDocument::from_xml(xml) {
            let _ = doc.to_xml().expect("parsed dependency document must serialize");
        }
        if let Ok(doc) = LicenseDocument::from_xml(xml) {
            let _ = doc.to_xml().expect("parsed license document must serialize");
        }
    }
});
