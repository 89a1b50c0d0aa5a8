//! 라이선스 요약 파서
//!
//! `dependencycheck.license` measure(`title~url;title~url`)를 화면 표시용 목록으로 변환합니다.

use std::collections::HashSet;

use serde::Serialize;

use crate::scan::{ENTRY_SEPARATOR, FIELD_SEPARATOR};

/// 프로젝트에서 발견된 라이선스 한 건
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LicenseSummaryEntry {
    /// 라이선스 이름
    pub title: String,
    /// 라이선스 본문 URL (없으면 빈 문자열)
    pub url: String,
}

/// 라이선스 요약 문자열을 파싱합니다.
///
/// 처음 나온 순서를 유지하며 중복은 제거합니다. `~`가 없는 엔트리는 URL이 비어 있고,
/// 세 번째 이후 필드는 무시합니다.
pub fn parse_license_summary(input: &str) -> Vec<LicenseSummaryEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for raw in input.split(ENTRY_SEPARATOR) {
        if raw.trim().is_empty() {
            continue;
        }
        let mut fields = raw.split(FIELD_SEPARATOR);
        let title = fields.next().unwrap_or_default();
        let url = fields.next().unwrap_or_default();

        let entry = LicenseSummaryEntry {
            title: title.to_owned(),
            url: url.to_owned(),
        };
        if seen.insert(entry.clone()) {
            entries.push(entry);
        }
    }

    entries
}
