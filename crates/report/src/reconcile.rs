//! 의존성 대조기
//!
//! 의존성 그래프의 엣지를 스캔 결과와 맞춰 리포트 행을 만듭니다.
//!
//! # 처리 순서
//!
//! ```text
//! snapshot ──(TRK이면 하위 모듈 추가)──> snapshot ids
//!                                          │
//! settings ──> ScopeSet ──────────> EdgeQuery(PRJ, usages)
//!                                          │
//! measure ──> ScanResultMap ──────> reconcile() ──> 중복 제거된 ReportRow
//! ```

use std::collections::HashSet;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use depcheck_core::keys;
use depcheck_core::metrics as m;
use depcheck_core::store::{DependencyGraph, MeasureStore, SettingsStore};
use depcheck_core::types::{DependencyEdge, EdgeQuery, ResourceScope, Snapshot, SnapshotId, Usage};

use crate::error::DependencyReportError;
use crate::license_summary::{LicenseSummaryEntry, parse_license_summary};
use crate::scan::{MalformedEntry, ScanResultMap};
use crate::scope::{ScopeSet, load_scopes};

/// 리포트 한 행
///
/// 리포트 생성 한 번 동안만 존재하며, 전체 필드 동등성으로 중복을 제거합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReportRow {
    /// 대상 아티팩트 표시 이름
    pub name: String,
    /// 사용 범위 (CSV 전용 리포트에서는 `None`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// 대상 버전
    pub version: String,
    /// 스캔된 라이선스
    pub license: String,
    /// 검사 상태 (항상 비어 있지 않음)
    pub status: String,
}

/// 프로젝트 리포트 화면용 결과
#[derive(Debug, Clone, Serialize)]
pub struct DependencyReport {
    /// 대상 스냅샷
    pub snapshot: Snapshot,
    /// 중복 제거된 행 (엣지 조회 순서 유지)
    pub rows: Vec<ReportRow>,
    /// 라이선스 요약
    pub licenses: Vec<LicenseSummaryEntry>,
    /// 건너뛴 스캔 엔트리
    pub diagnostics: Vec<MalformedEntry>,
}

impl DependencyReport {
    /// 진단 정보가 있으면 첫 번째 항목을 에러로 반환합니다.
    pub fn ensure_clean(&self) -> Result<(), DependencyReportError> {
        match self.diagnostics.first() {
            Some(entry) => Err(DependencyReportError::MalformedScanEntry(entry.clone())),
            None => Ok(()),
        }
    }
}

/// 엣지 목록과 스캔 맵을 대조해 중복 제거된 행을 만듭니다.
///
/// `PRJ` 대상이면서 활성 범위에 속하고, 스캔 결과가 있으며 상태가 비어 있지 않은
/// 엣지만 행이 됩니다. 결과 순서는 입력 엣지 순서를 따릅니다.
pub fn reconcile(
    edges: &[DependencyEdge],
    scopes: &ScopeSet,
    scan: &ScanResultMap,
    include_usage: bool,
) -> Vec<ReportRow> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for edge in edges {
        if edge.target_scope != ResourceScope::Project || !scopes.contains(edge.usage) {
            continue;
        }
        let Some(entry) = scan.get(&edge.target_key) else {
            continue;
        };
        if entry.status.is_empty() {
            continue;
        }

        let row = ReportRow {
            name: edge.target_name.clone(),
            usage: include_usage.then_some(edge.usage),
            version: edge.target_version.clone(),
            license: entry.license.clone(),
            status: entry.status.clone(),
        };
        if seen.insert(row.clone()) {
            rows.push(row);
        }
    }

    rows
}

/// 협력자 저장소를 주입받아 리포트를 생성하는 대조기
///
/// 상태를 갖지 않으며 호출마다 저장소에서 다시 조회합니다.
pub struct Reconciler<'a> {
    graph: &'a dyn DependencyGraph,
    measures: &'a dyn MeasureStore,
    settings: &'a dyn SettingsStore,
}

struct Collected {
    snapshot: Snapshot,
    rows: Vec<ReportRow>,
    diagnostics: Vec<MalformedEntry>,
}

impl<'a> Reconciler<'a> {
    /// 새 대조기를 생성합니다.
    pub fn new(
        graph: &'a dyn DependencyGraph,
        measures: &'a dyn MeasureStore,
        settings: &'a dyn SettingsStore,
    ) -> Self {
        Self {
            graph,
            measures,
            settings,
        }
    }

    /// 프로젝트 리포트 화면용 결과를 생성합니다 (사용 범위 포함).
    pub fn project_report(
        &self,
        snapshot_id: SnapshotId,
    ) -> Result<DependencyReport, DependencyReportError> {
        let started = Instant::now();
        let collected = self.collect(snapshot_id, true)?;

        let licenses = match self.measures.measure(snapshot_id, keys::MEASURE_LICENSE)? {
            Some(measure) => parse_license_summary(measure.data.as_deref().unwrap_or_default()),
            None => Vec::new(),
        };

        metrics::counter!(m::REPORT_GENERATED_TOTAL, m::LABEL_FORMAT => "table").increment(1);
        metrics::histogram!(m::REPORT_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

        Ok(DependencyReport {
            snapshot: collected.snapshot,
            rows: collected.rows,
            licenses,
            diagnostics: collected.diagnostics,
        })
    }

    /// CSV 내보내기용 행을 생성합니다 (사용 범위 제외).
    pub fn csv_rows(&self, snapshot_id: SnapshotId) -> Result<Vec<ReportRow>, DependencyReportError> {
        let started = Instant::now();
        let collected = self.collect(snapshot_id, false)?;

        metrics::counter!(m::REPORT_GENERATED_TOTAL, m::LABEL_FORMAT => "csv").increment(1);
        metrics::histogram!(m::REPORT_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

        Ok(collected.rows)
    }

    /// 스냅샷과 하위 모듈 스냅샷 ID 목록을 결정합니다.
    fn snapshot_ids(&self, snapshot: &Snapshot) -> Result<Vec<SnapshotId>, DependencyReportError> {
        let mut ids = vec![snapshot.id];
        if snapshot.qualifier.is_aggregate() {
            ids.extend(self.graph.module_snapshots(snapshot.id)?);
        }
        Ok(ids)
    }

    fn collect(
        &self,
        snapshot_id: SnapshotId,
        include_usage: bool,
    ) -> Result<Collected, DependencyReportError> {
        let snapshot = self
            .graph
            .snapshot(snapshot_id)?
            .ok_or_else(|| DependencyReportError::NotFound(snapshot_id.to_string()))?;

        let measure = self
            .measures
            .measure(snapshot_id, keys::MEASURE_DEPENDENCY)?
            .ok_or_else(|| DependencyReportError::MissingScanResult {
                snapshot: snapshot_id.to_string(),
            })?;
        let scan = ScanResultMap::parse(measure.data.as_deref().unwrap_or_default());
        if !scan.diagnostics().is_empty() {
            warn!(
                snapshot_id = %snapshot_id,
                skipped = scan.diagnostics().len(),
                "scan result contains malformed entries"
            );
            metrics::counter!(m::REPORT_MALFORMED_ENTRIES_TOTAL)
                .increment(scan.diagnostics().len() as u64);
        }

        let scopes = load_scopes(self.settings)?;
        let ids = self.snapshot_ids(&snapshot)?;

        let edges = if scopes.is_empty() {
            Vec::new()
        } else {
            self.graph.edges(&EdgeQuery {
                snapshot_ids: ids.clone(),
                target_scope: ResourceScope::Project,
                usages: scopes.usages(),
            })?
        };

        let rows = reconcile(&edges, &scopes, &scan, include_usage);
        metrics::counter!(m::REPORT_ROWS_EMITTED_TOTAL).increment(rows.len() as u64);

        debug!(
            snapshot_id = %snapshot_id,
            snapshots = ids.len(),
            edges = edges.len(),
            scan_entries = scan.len(),
            rows = rows.len(),
            "dependencies reconciled"
        );

        Ok(Collected {
            snapshot,
            rows,
            diagnostics: scan.into_diagnostics(),
        })
    }
}
