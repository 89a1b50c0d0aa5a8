#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use depcheck_allowlist::{License, LicenseDocument, SourceType, XmlDocument};

/// 퍼저용 구조적 License 입력
#[derive(Arbitrary, Debug)]
struct FuzzLicense {
    id: String,
    title: String,
    description: String,
    url: String,
    source_type: u8,
    commercial: bool,
}

/// XML 1.0에 쓸 수 없는 제어 문자를 제거하고 앞뒤 공백을 정리
fn clean(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n'))
        .collect::<String>()
        .trim()
        .to_owned()
}

fuzz_target!(|input: Vec<FuzzLicense>| {
    let mut doc = LicenseDocument::default();
    // 라이선스 수 제한 (퍼징 성능)
    for (i, l) in input.iter().take(32).enumerate() {
        let id = clean(&l.id);
        let license = License {
            id: if id.is_empty() { format!("lic-{i}") } else { id },
            title: clean(&l.title),
            description: clean(&l.description),
            url: clean(&l.url),
            source_type: SourceType::ALL[usize::from(l.source_type) % SourceType::ALL.len()],
            commercial: l.commercial,
        };
        let _ = doc.add(license);
    }

    let xml = doc.to_xml().expect("license document must serialize");
    let parsed = LicenseDocument::from_xml(&xml).expect("serialized document must parse");
    assert_eq!(parsed, doc);
});
