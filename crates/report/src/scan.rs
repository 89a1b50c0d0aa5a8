//! 스캔 결과 파서
//!
//! `dependencycheck.dependency` measure 문자열을 아티팩트 키별 조회 맵으로 변환합니다.
//!
//! # 형식
//!
//! ```text
//! org.slf4j:slf4j-api~MIT~OK;commons-io:commons-io~Apache-2.0~Unknown
//! ```
//!
//! - 엔트리는 `;`로 구분, 각 엔트리는 `~`로 구분된 정확히 세 개의 필드
//! - 같은 키가 여러 번 나오면 마지막 엔트리가 이깁니다
//! - 필드 수가 맞지 않는 엔트리는 건너뛰고 [`MalformedEntry`]로 기록합니다
//! - 빈 엔트리(연속된 `;`, 끝의 `;`)는 조용히 무시합니다

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::warn;

/// 엔트리 구분자
pub const ENTRY_SEPARATOR: char = ';';

/// 필드 구분자
pub const FIELD_SEPARATOR: char = '~';

/// 스캔 결과 엔트리
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEntry {
    /// 아티팩트 키 (예: `org.slf4j:slf4j-api`)
    pub artifact_key: String,
    /// 감지된 라이선스
    pub license: String,
    /// 검사 상태 (빈 문자열일 수 있음)
    pub status: String,
}

/// 건너뛴 잘못된 엔트리 진단 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedEntry {
    /// 빈 엔트리를 포함한 0 기반 위치
    pub index: usize,
    /// 원본 엔트리 문자열
    pub entry: String,
    /// 실제 필드 수
    pub fields: usize,
}

impl fmt::Display for MalformedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry #{} '{}' has {} field(s), expected 3",
            self.index, self.entry, self.fields
        )
    }
}

/// 아티팩트 키 → 스캔 결과 조회 맵
#[derive(Debug, Clone, Default)]
pub struct ScanResultMap {
    entries: HashMap<String, ScanEntry>,
    diagnostics: Vec<MalformedEntry>,
}

impl ScanResultMap {
    /// measure 문자열을 파싱합니다. 실패하지 않습니다.
    pub fn parse(input: &str) -> Self {
        let mut map = Self::default();

        for (index, raw) in input.split(ENTRY_SEPARATOR).enumerate() {
            if raw.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
            let [key, license, status] = fields.as_slice() else {
                warn!(
                    index,
                    entry = raw,
                    fields = fields.len(),
                    "skipping malformed scan entry"
                );
                map.diagnostics.push(MalformedEntry {
                    index,
                    entry: raw.to_owned(),
                    fields: fields.len(),
                });
                continue;
            };

            // 후행 엔트리가 앞의 같은 키를 덮어씀
            map.entries.insert(
                (*key).to_owned(),
                ScanEntry {
                    artifact_key: (*key).to_owned(),
                    license: (*license).to_owned(),
                    status: (*status).to_owned(),
                },
            );
        }

        map
    }

    /// 아티팩트 키로 엔트리를 조회합니다.
    pub fn get(&self, artifact_key: &str) -> Option<&ScanEntry> {
        self.entries.get(artifact_key)
    }

    /// 고유 키 수
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 엔트리가 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 모든 엔트리 (순서 없음)
    pub fn entries(&self) -> impl Iterator<Item = &ScanEntry> {
        self.entries.values()
    }

    /// 건너뛴 잘못된 엔트리 목록 (입력 순서)
    pub fn diagnostics(&self) -> &[MalformedEntry] {
        &self.diagnostics
    }

    /// 진단 정보를 꺼내며 맵을 소비합니다.
    pub fn into_diagnostics(self) -> Vec<MalformedEntry> {
        self.diagnostics
    }
}
