//! 외부 협력자 인터페이스: settings / measure / 의존성 그래프
//!
//! 엔진은 전역 상태 대신 이 trait들을 주입받아 사용합니다.
//! 구현체는 요청 단위로 조회되며, 요청 간 캐시를 두지 않습니다.
//!
//! # 구현체
//!
//! - [`MemorySettingsStore`], [`MemoryMeasureStore`], [`MemoryDependencyGraph`]: 테스트/임베딩용
//! - [`FileSettingsStore`]: TOML 파일 기반 settings 저장소
//! - [`AnalysisFixture`]: JSON 파일에서 스냅샷/엣지/measure를 로드

pub mod file;
pub mod fixture;
pub mod memory;

pub use file::FileSettingsStore;
pub use fixture::AnalysisFixture;
pub use memory::{MemoryDependencyGraph, MemoryMeasureStore, MemorySettingsStore};

use crate::error::StoreError;
use crate::types::{DependencyEdge, EdgeQuery, Snapshot, SnapshotId};

/// 저장된 값의 리비전 번호
///
/// 값이 쓰일 때마다 1씩 증가합니다. 낙관적 동시성 검사에 사용됩니다.
pub type Revision = u64;

/// 리비전이 붙은 저장 값
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    /// 문자열 값 (XML 문서, bool 문자열 등)
    pub value: String,
    /// 현재 리비전
    pub revision: Revision,
}

/// 문자열 키-값 settings 저장소
pub trait SettingsStore: Send + Sync {
    /// 키에 해당하는 값을 조회합니다. 없으면 `None`.
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError>;

    /// 값을 저장하고 새 리비전을 반환합니다.
    ///
    /// `expected`가 현재 저장된 리비전과 다르면 `StoreError::Conflict`를 반환하고
    /// 아무것도 쓰지 않습니다. `None`은 "키가 아직 없어야 함"을 의미합니다.
    fn put(
        &self,
        key: &str,
        value: &str,
        expected: Option<Revision>,
    ) -> Result<Revision, StoreError>;

    /// bool 플래그를 조회합니다.
    ///
    /// 값이 없거나 `true`(대소문자 무시)가 아니면 `false`입니다.
    fn get_bool(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self
            .get(key)?
            .is_some_and(|stored| stored.value.trim().eq_ignore_ascii_case("true")))
    }

    /// bool 플래그를 무조건 덮어씁니다.
    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        let current = self.get(key)?.map(|stored| stored.revision);
        self.put(key, if value { "true" } else { "false" }, current)?;
        Ok(())
    }
}

/// 스냅샷에 첨부된 measure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measure {
    /// 직렬화된 데이터 (없을 수 있음)
    pub data: Option<String>,
}

/// 스냅샷별 measure 저장소
pub trait MeasureStore: Send + Sync {
    /// measure를 조회합니다.
    ///
    /// measure 자체가 없으면 `None`, 있지만 데이터가 비어 있으면 `Some(Measure { data: None })`.
    fn measure(&self, snapshot: SnapshotId, metric: &str) -> Result<Option<Measure>, StoreError>;
}

/// 의존성 그래프 제공자
pub trait DependencyGraph: Send + Sync {
    /// 스냅샷을 조회합니다.
    fn snapshot(&self, id: SnapshotId) -> Result<Option<Snapshot>, StoreError>;

    /// 루트 스냅샷이 `root`인 `PRJ` 범위 하위 모듈 스냅샷 ID 목록을 반환합니다.
    fn module_snapshots(&self, root: SnapshotId) -> Result<Vec<SnapshotId>, StoreError>;

    /// 조건에 맞는 엣지를 consumer 키 오름차순(안정 정렬)으로 반환합니다.
    fn edges(&self, query: &EdgeQuery) -> Result<Vec<DependencyEdge>, StoreError>;
}
