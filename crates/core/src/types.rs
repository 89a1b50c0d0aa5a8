//! 도메인 타입: 시스템 전역에서 사용되는 공통 타입
//!
//! 의존성 그래프 제공자가 넘겨주는 스냅샷/의존성 엣지와
//! 의존성 사용 범위(usage)를 정의합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 의존성 사용 범위 (Maven scope)
///
/// 의존성이 어느 단계에서 적용되는지를 나타냅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Usage {
    /// 컴파일 시점
    Compile,
    /// 런타임 컨테이너가 제공
    Provided,
    /// 실행 시점
    Runtime,
    /// 테스트 전용
    Test,
}

impl Usage {
    /// 모든 사용 범위 (설정 화면 순서)
    pub const ALL: [Usage; 4] = [Usage::Compile, Usage::Provided, Usage::Runtime, Usage::Test];

    /// 저장소에서 쓰는 소문자 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Provided => "provided",
            Self::Runtime => "runtime",
            Self::Test => "test",
        }
    }

    /// 문자열에서 사용 범위를 파싱합니다 (대소문자 구분 없음).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "compile" => Some(Self::Compile),
            "provided" => Some(Self::Provided),
            "runtime" => Some(Self::Runtime),
            "test" => Some(Self::Test),
            _ => None,
        }
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 리소스 범위 코드
///
/// `PRJ`는 프로젝트/모듈 수준 아티팩트, `LIB`는 외부 라이브러리입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceScope {
    /// 프로젝트 수준 (`PRJ`)
    #[serde(rename = "PRJ")]
    Project,
    /// 라이브러리 (`LIB`)
    #[serde(rename = "LIB")]
    Library,
}

impl ResourceScope {
    /// 저장소 코드 (`PRJ` / `LIB`)
    pub fn code(&self) -> &'static str {
        match self {
            Self::Project => "PRJ",
            Self::Library => "LIB",
        }
    }
}

impl fmt::Display for ResourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 스냅샷 qualifier
///
/// `TRK`는 하위 모듈을 묶는 최상위 프로젝트, `BRC`는 단일 모듈입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Qualifier {
    /// 집계 프로젝트 (`TRK`)
    #[serde(rename = "TRK")]
    Project,
    /// 모듈 (`BRC`)
    #[serde(rename = "BRC")]
    Module,
}

impl Qualifier {
    /// 집계 프로젝트 여부
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Project)
    }
}

/// 스냅샷 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(pub u64);

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 분석 스냅샷
///
/// 프로젝트 또는 모듈의 특정 시점 분석 결과입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// 스냅샷 ID
    pub id: SnapshotId,
    /// 리소스 키
    pub key: String,
    /// 표시 이름
    pub name: String,
    /// qualifier (`TRK` / `BRC`)
    pub qualifier: Qualifier,
    /// 리소스 범위
    pub scope: ResourceScope,
    /// 루트 스냅샷 ID (최상위 프로젝트는 `None`)
    #[serde(default)]
    pub root_snapshot_id: Option<SnapshotId>,
}

/// 해석된 의존성 엣지
///
/// 외부 그래프 제공자가 생성하며 분석 단위로 불변입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// 의존하는 쪽 스냅샷
    pub consumer_snapshot_id: SnapshotId,
    /// 의존하는 쪽 리소스 키 (정렬 기준)
    pub consumer_key: String,
    /// 대상 아티팩트 키 (예: `org.slf4j:slf4j-api`)
    pub target_key: String,
    /// 대상 표시 이름
    pub target_name: String,
    /// 대상 버전
    pub target_version: String,
    /// 사용 범위
    pub usage: Usage,
    /// 대상 리소스 범위
    pub target_scope: ResourceScope,
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}@{} ({})",
            self.consumer_key, self.target_key, self.target_version, self.usage,
        )
    }
}

/// 의존성 엣지 조회 조건
///
/// 모든 조건은 AND로 결합됩니다. `usages`가 비어 있으면 결과도 비어 있습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeQuery {
    /// 의존하는 쪽 스냅샷 ID 목록
    pub snapshot_ids: Vec<SnapshotId>,
    /// 대상 리소스 범위
    pub target_scope: ResourceScope,
    /// 허용된 사용 범위
    pub usages: Vec<Usage>,
}

impl EdgeQuery {
    /// 엣지가 조건을 만족하는지 확인합니다.
    pub fn matches(&self, edge: &DependencyEdge) -> bool {
        edge.target_scope == self.target_scope
            && self.snapshot_ids.contains(&edge.consumer_snapshot_id)
            && self.usages.contains(&edge.usage)
    }
}
