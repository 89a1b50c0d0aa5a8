//! 리포트 모듈 에러 타입
//!
//! [`DependencyReportError`]는 리포트 생성 중 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<DependencyReportError> for DepcheckError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **조회 실패**: `NotFound`, `MissingScanResult`
//! - **스캔 결과 형식**: `MalformedScanEntry`
//! - **저장소**: `Store`
//! - **내보내기**: `Export`

use depcheck_core::error::{DepcheckError, ReportError, StoreError};

use crate::scan::MalformedEntry;

/// 리포트 생성 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum DependencyReportError {
    /// 스냅샷을 찾을 수 없음
    #[error("snapshot not found: {0}")]
    NotFound(String),

    /// 스냅샷에 스캔 결과 measure 자체가 없음
    #[error("no scan result recorded for snapshot {snapshot}")]
    MissingScanResult {
        /// 대상 스냅샷 ID
        snapshot: String,
    },

    /// `key~license~status` 형식이 아닌 스캔 엔트리 (strict 모드)
    #[error("malformed scan entry: {0}")]
    MalformedScanEntry(MalformedEntry),

    /// 협력자 저장소 실패
    #[error(transparent)]
    Store(#[from] StoreError),

    /// CSV 작성 실패
    #[error("export failed: {0}")]
    Export(String),
}

impl From<DependencyReportError> for DepcheckError {
    fn from(err: DependencyReportError) -> Self {
        match err {
            DependencyReportError::NotFound(id) => DepcheckError::Report(ReportError::NotFound(id)),
            DependencyReportError::MissingScanResult { snapshot } => {
                DepcheckError::Report(ReportError::MissingScanResult(snapshot))
            }
            DependencyReportError::MalformedScanEntry(entry) => {
                DepcheckError::Report(ReportError::Malformed(entry.to_string()))
            }
            DependencyReportError::Store(e) => DepcheckError::Store(e),
            DependencyReportError::Export(msg) => {
                DepcheckError::Io(std::io::Error::other(format!("export failed: {msg}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_scan_result_display() {
        let err = DependencyReportError::MissingScanResult {
            snapshot: "42".to_owned(),
        };
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn malformed_entry_display_includes_entry() {
        let err = DependencyReportError::MalformedScanEntry(MalformedEntry {
            index: 3,
            entry: "only~two".to_owned(),
            fields: 2,
        });
        let msg = err.to_string();
        assert!(msg.contains("only~two"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn converts_not_found() {
        let err: DepcheckError = DependencyReportError::NotFound("7".to_owned()).into();
        assert!(matches!(err, DepcheckError::Report(ReportError::NotFound(_))));
    }

    #[test]
    fn converts_missing_scan_result() {
        let err: DepcheckError = DependencyReportError::MissingScanResult {
            snapshot: "7".to_owned(),
        }
        .into();
        assert!(matches!(
            err,
            DepcheckError::Report(ReportError::MissingScanResult(_))
        ));
    }

    #[test]
    fn store_conflict_stays_a_store_error() {
        let err: DepcheckError = DependencyReportError::Store(StoreError::Conflict {
            key: "k".to_owned(),
            expected: None,
            actual: Some(1),
        })
        .into();
        assert!(matches!(err, DepcheckError::Store(StoreError::Conflict { .. })));
    }

    #[test]
    fn converts_export_to_io() {
        let err: DepcheckError = DependencyReportError::Export("disk full".to_owned()).into();
        assert!(matches!(err, DepcheckError::Io(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
