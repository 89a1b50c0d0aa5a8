//! 분석 결과 JSON 파일: 그래프와 measure를 한 파일에서 로드
//!
//! # JSON 형식
//!
//! ```json
//! {
//!   "snapshots": [
//!     { "id": 1, "key": "org.acme:app", "name": "App", "qualifier": "TRK", "scope": "PRJ" }
//!   ],
//!   "edges": [
//!     {
//!       "consumer_snapshot_id": 1, "consumer_key": "org.acme:app",
//!       "target_key": "org.acme:core", "target_name": "Core", "target_version": "1.0",
//!       "usage": "compile", "target_scope": "PRJ"
//!     }
//!   ],
//!   "measures": [
//!     { "snapshot_id": 1, "metric": "dependencycheck.dependency", "data": "org.acme:core~MIT~OK" }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::{MemoryDependencyGraph, MemoryMeasureStore};
use crate::types::{DependencyEdge, Snapshot, SnapshotId};

/// 분석 파일 최대 크기 (50 MB)
const MAX_FIXTURE_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// 단일 measure 레코드
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasureRecord {
    /// 대상 스냅샷
    pub snapshot_id: SnapshotId,
    /// measure 키
    pub metric: String,
    /// 데이터 (없을 수 있음)
    #[serde(default)]
    pub data: Option<String>,
}

/// 분석 결과 파일 내용
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisFixture {
    /// 스냅샷 목록
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
    /// 의존성 엣지 목록
    #[serde(default)]
    pub edges: Vec<DependencyEdge>,
    /// measure 목록
    #[serde(default)]
    pub measures: Vec<MeasureRecord>,
}

impl AnalysisFixture {
    /// JSON 문자열에서 파싱합니다.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(|e| StoreError::Corrupt {
            key: "analysis".to_owned(),
            reason: e.to_string(),
        })
    }

    /// 파일에서 로드합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| {
            StoreError::Backend(format!("failed to stat {}: {e}", path.display()))
        })?;
        if metadata.len() > MAX_FIXTURE_FILE_SIZE {
            return Err(StoreError::Backend(format!(
                "{}: {} bytes exceeds maximum {} bytes",
                path.display(),
                metadata.len(),
                MAX_FIXTURE_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Backend(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// 그래프와 measure 저장소로 분리합니다.
    pub fn into_stores(self) -> (MemoryDependencyGraph, MemoryMeasureStore) {
        let mut measures = MemoryMeasureStore::new();
        for record in self.measures {
            measures.insert(record.snapshot_id, record.metric, record.data);
        }
        (MemoryDependencyGraph::new(self.snapshots, self.edges), measures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DependencyGraph, Measure, MeasureStore};

    const SAMPLE: &str = r#"{
  "snapshots": [
    { "id": 1, "key": "org.acme:app", "name": "App", "qualifier": "TRK", "scope": "PRJ" },
    { "id": 2, "key": "org.acme:web", "name": "Web", "qualifier": "BRC", "scope": "PRJ", "root_snapshot_id": 1 }
  ],
  "edges": [
    {
      "consumer_snapshot_id": 2, "consumer_key": "org.acme:web",
      "target_key": "org.acme:core", "target_name": "Core", "target_version": "1.0",
      "usage": "compile", "target_scope": "PRJ"
    }
  ],
  "measures": [
    { "snapshot_id": 1, "metric": "dependencycheck.dependency", "data": "org.acme:core~MIT~OK" },
    { "snapshot_id": 2, "metric": "dependencycheck.dependency" }
  ]
}"#;

    #[test]
    fn parses_sample_fixture() {
        let fixture = AnalysisFixture::from_json(SAMPLE).unwrap();
        assert_eq!(fixture.snapshots.len(), 2);
        assert_eq!(fixture.edges.len(), 1);
        assert_eq!(fixture.measures.len(), 2);
    }

    #[test]
    fn into_stores_wires_graph_and_measures() {
        let (graph, measures) = AnalysisFixture::from_json(SAMPLE).unwrap().into_stores();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(
            graph.module_snapshots(SnapshotId(1)).unwrap(),
            vec![SnapshotId(2)]
        );
        assert_eq!(
            measures
                .measure(SnapshotId(1), "dependencycheck.dependency")
                .unwrap(),
            Some(Measure {
                data: Some("org.acme:core~MIT~OK".to_owned())
            })
        );
        assert_eq!(
            measures
                .measure(SnapshotId(2), "dependencycheck.dependency")
                .unwrap(),
            Some(Measure { data: None })
        );
    }

    #[test]
    fn invalid_json_is_corrupt() {
        assert!(matches!(
            AnalysisFixture::from_json("{not json").unwrap_err(),
            StoreError::Corrupt { .. }
        ));
    }

    #[test]
    fn load_missing_file_is_backend_error() {
        assert!(matches!(
            AnalysisFixture::load("/nonexistent/analysis.json").unwrap_err(),
            StoreError::Backend(_)
        ));
    }
}
