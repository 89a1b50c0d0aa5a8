//! 메모리 기반 저장소 구현

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::store::{DependencyGraph, Measure, MeasureStore, Revision, SettingsStore, StoredValue};
use crate::types::{DependencyEdge, EdgeQuery, ResourceScope, Snapshot, SnapshotId};

/// 메모리 기반 settings 저장소
///
/// 프로세스 안에서만 유지되며 테스트와 임베딩 용도로 사용합니다.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: Mutex<HashMap<String, StoredValue>>,
}

impl MemorySettingsStore {
    /// 빈 저장소를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 초기 값으로 저장소를 생성합니다. 모든 값은 리비전 1에서 시작합니다.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|(k, v)| {
                (
                    k.into(),
                    StoredValue {
                        value: v.into(),
                        revision: 1,
                    },
                )
            })
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        let values = self
            .values
            .lock()
            .map_err(|_| StoreError::Backend("settings lock poisoned".to_owned()))?;
        Ok(values.get(key).cloned())
    }

    fn put(
        &self,
        key: &str,
        value: &str,
        expected: Option<Revision>,
    ) -> Result<Revision, StoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| StoreError::Backend("settings lock poisoned".to_owned()))?;

        let actual = values.get(key).map(|stored| stored.revision);
        if actual != expected {
            return Err(StoreError::Conflict {
                key: key.to_owned(),
                expected,
                actual,
            });
        }

        let revision = actual.unwrap_or(0) + 1;
        values.insert(
            key.to_owned(),
            StoredValue {
                value: value.to_owned(),
                revision,
            },
        );
        Ok(revision)
    }
}

/// 메모리 기반 measure 저장소
#[derive(Debug, Default, Clone)]
pub struct MemoryMeasureStore {
    measures: HashMap<(SnapshotId, String), Measure>,
}

impl MemoryMeasureStore {
    /// 빈 저장소를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// measure를 등록합니다. 같은 키가 있으면 덮어씁니다.
    pub fn insert(&mut self, snapshot: SnapshotId, metric: impl Into<String>, data: Option<String>) {
        self.measures
            .insert((snapshot, metric.into()), Measure { data });
    }
}

impl MeasureStore for MemoryMeasureStore {
    fn measure(&self, snapshot: SnapshotId, metric: &str) -> Result<Option<Measure>, StoreError> {
        Ok(self.measures.get(&(snapshot, metric.to_owned())).cloned())
    }
}

/// 메모리 기반 의존성 그래프
#[derive(Debug, Default, Clone)]
pub struct MemoryDependencyGraph {
    snapshots: Vec<Snapshot>,
    edges: Vec<DependencyEdge>,
}

impl MemoryDependencyGraph {
    /// 스냅샷과 엣지 목록으로 그래프를 생성합니다.
    pub fn new(snapshots: Vec<Snapshot>, edges: Vec<DependencyEdge>) -> Self {
        Self { snapshots, edges }
    }

    /// 그래프 내 엣지 수
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl DependencyGraph for MemoryDependencyGraph {
    fn snapshot(&self, id: SnapshotId) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.snapshots.iter().find(|s| s.id == id).cloned())
    }

    fn module_snapshots(&self, root: SnapshotId) -> Result<Vec<SnapshotId>, StoreError> {
        Ok(self
            .snapshots
            .iter()
            .filter(|s| s.scope == ResourceScope::Project && s.root_snapshot_id == Some(root))
            .map(|s| s.id)
            .collect())
    }

    fn edges(&self, query: &EdgeQuery) -> Result<Vec<DependencyEdge>, StoreError> {
        let mut edges: Vec<DependencyEdge> = self
            .edges
            .iter()
            .filter(|edge| query.matches(edge))
            .cloned()
            .collect();
        // sort_by는 안정 정렬이므로 같은 consumer 안의 원래 순서가 유지됨
        edges.sort_by(|a, b| a.consumer_key.cmp(&b.consumer_key));
        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Qualifier, Usage};

    fn snapshot(id: u64, qualifier: Qualifier, root: Option<u64>) -> Snapshot {
        Snapshot {
            id: SnapshotId(id),
            key: format!("org.acme:s{id}"),
            name: format!("s{id}"),
            qualifier,
            scope: ResourceScope::Project,
            root_snapshot_id: root.map(SnapshotId),
        }
    }

    fn edge(consumer: u64, consumer_key: &str, target: &str) -> DependencyEdge {
        DependencyEdge {
            consumer_snapshot_id: SnapshotId(consumer),
            consumer_key: consumer_key.to_owned(),
            target_key: target.to_owned(),
            target_name: target.to_owned(),
            target_version: "1.0".to_owned(),
            usage: Usage::Compile,
            target_scope: ResourceScope::Project,
        }
    }

    #[test]
    fn settings_put_requires_matching_revision() {
        let store = MemorySettingsStore::new();
        let rev = store.put("k", "v1", None).unwrap();
        assert_eq!(rev, 1);

        let err = store.put("k", "v2", None).unwrap_err();
        assert!(matches!(err, StoreError::Conflict { actual: Some(1), .. }));

        let rev = store.put("k", "v2", Some(1)).unwrap();
        assert_eq!(rev, 2);
        assert_eq!(store.get("k").unwrap().unwrap().value, "v2");
    }

    #[test]
    fn settings_stale_revision_is_rejected_without_write() {
        let store = MemorySettingsStore::with_values([("k", "original")]);
        store.put("k", "first", Some(1)).unwrap();
        let err = store.put("k", "second", Some(1)).unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert_eq!(store.get("k").unwrap().unwrap().value, "first");
    }

    #[test]
    fn get_bool_defaults_to_false() {
        let store = MemorySettingsStore::with_values([("a", "true"), ("b", "TRUE"), ("c", "yes")]);
        assert!(store.get_bool("a").unwrap());
        assert!(store.get_bool("b").unwrap());
        assert!(!store.get_bool("c").unwrap());
        assert!(!store.get_bool("missing").unwrap());
    }

    #[test]
    fn set_bool_overwrites_existing_value() {
        let store = MemorySettingsStore::with_values([("flag", "false")]);
        store.set_bool("flag", true).unwrap();
        assert!(store.get_bool("flag").unwrap());
        store.set_bool("new-flag", true).unwrap();
        assert!(store.get_bool("new-flag").unwrap());
    }

    #[test]
    fn measure_absent_vs_empty() {
        let mut store = MemoryMeasureStore::new();
        store.insert(SnapshotId(1), "m", None);
        assert_eq!(
            store.measure(SnapshotId(1), "m").unwrap(),
            Some(Measure { data: None })
        );
        assert_eq!(store.measure(SnapshotId(2), "m").unwrap(), None);
    }

    #[test]
    fn module_snapshots_filters_by_root() {
        let graph = MemoryDependencyGraph::new(
            vec![
                snapshot(1, Qualifier::Project, None),
                snapshot(2, Qualifier::Module, Some(1)),
                snapshot(3, Qualifier::Module, Some(1)),
                snapshot(4, Qualifier::Module, Some(9)),
            ],
            vec![],
        );
        assert_eq!(
            graph.module_snapshots(SnapshotId(1)).unwrap(),
            vec![SnapshotId(2), SnapshotId(3)]
        );
    }

    #[test]
    fn edges_are_ordered_by_consumer_key_stably() {
        let graph = MemoryDependencyGraph::new(
            vec![],
            vec![
                edge(1, "org.acme:b", "first-b"),
                edge(1, "org.acme:a", "first-a"),
                edge(1, "org.acme:b", "second-b"),
            ],
        );
        let query = EdgeQuery {
            snapshot_ids: vec![SnapshotId(1)],
            target_scope: ResourceScope::Project,
            usages: vec![Usage::Compile],
        };
        let targets: Vec<String> = graph
            .edges(&query)
            .unwrap()
            .into_iter()
            .map(|e| e.target_key)
            .collect();
        assert_eq!(targets, vec!["first-a", "first-b", "second-b"]);
    }
}
