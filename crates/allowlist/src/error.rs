//! 허용 목록 에러 타입
//!
//! [`AllowListStoreError`]는 허용 목록 조회/변경 중 발생하는 모든 에러를 나타냅니다.
//! 불변식 위반(`LicenseAlreadyExists`, `LicenseInUse`, `IndexOutOfRange`, `InvalidField`)은
//! 저장된 문서를 바꾸지 않은 채 반환됩니다.

use depcheck_core::error::{AllowListError, DepcheckError, StoreError};

/// 허용 목록 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum AllowListStoreError {
    /// 삭제 대상 라이선스가 없음
    #[error("license '{0}' not found")]
    NotFound(String),

    /// 같은 ID의 라이선스가 이미 있음
    #[error("license with id '{0}' already exists")]
    LicenseAlreadyExists(String),

    /// 라이선스를 참조하는 의존성이 있음
    #[error("license '{license_id}' cannot be deleted because {dependencies} dependencies are using it")]
    LicenseInUse {
        license_id: String,
        dependencies: usize,
    },

    /// 의존성 인덱스가 범위를 벗어남
    #[error("dependency index {index} out of range (document has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// 입력값 검증 실패
    #[error("invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// 저장된 XML 문서를 읽거나 쓸 수 없음
    #[error("document '{key}' is unusable: {reason}")]
    Document { key: String, reason: String },

    /// 프로젝트별 허용 목록이 설정에서 비활성화됨
    #[error("project-scoped allow-list is disabled (report.legacy_project_allowlist = false)")]
    LegacyDisabled,

    /// 협력자 저장소 실패 (동시 수정 충돌 포함)
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AllowListStoreError {
    /// 사용자에게 보여줄 검증 실패인지 여부
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::LicenseAlreadyExists(_)
                | Self::LicenseInUse { .. }
                | Self::IndexOutOfRange { .. }
                | Self::InvalidField { .. }
                | Self::LegacyDisabled
        )
    }

    /// 동시 수정 충돌인지 여부
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Store(StoreError::Conflict { .. }))
    }
}

impl From<AllowListStoreError> for DepcheckError {
    fn from(err: AllowListStoreError) -> Self {
        match err {
            AllowListStoreError::NotFound(id) => {
                DepcheckError::AllowList(AllowListError::NotFound(format!("license '{id}'")))
            }
            AllowListStoreError::Document { .. } => {
                DepcheckError::AllowList(AllowListError::Document(err.to_string()))
            }
            AllowListStoreError::Store(StoreError::Conflict { .. }) => {
                DepcheckError::AllowList(AllowListError::Conflict(err.to_string()))
            }
            AllowListStoreError::Store(e) => DepcheckError::Store(e),
            other => DepcheckError::AllowList(AllowListError::Validation(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn license_in_use_display() {
        let err = AllowListStoreError::LicenseInUse {
            license_id: "GPL-3.0".to_owned(),
            dependencies: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("GPL-3.0"));
        assert!(msg.contains('2'));
        assert!(err.is_validation());
    }

    #[test]
    fn index_out_of_range_display() {
        let err = AllowListStoreError::IndexOutOfRange { index: 5, len: 3 };
        assert!(err.to_string().contains('5'));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn validation_errors_convert_to_validation() {
        let err: DepcheckError = AllowListStoreError::LicenseAlreadyExists("MIT".to_owned()).into();
        assert!(matches!(
            err,
            DepcheckError::AllowList(AllowListError::Validation(_))
        ));
    }

    #[test]
    fn conflict_converts_to_allowlist_conflict() {
        let err = AllowListStoreError::Store(StoreError::Conflict {
            key: "dependencycheck.license".to_owned(),
            expected: Some(1),
            actual: Some(2),
        });
        assert!(err.is_conflict());
        let top: DepcheckError = err.into();
        assert!(matches!(
            top,
            DepcheckError::AllowList(AllowListError::Conflict(_))
        ));
    }

    #[test]
    fn backend_failure_stays_store_error() {
        let err: DepcheckError =
            AllowListStoreError::Store(StoreError::Backend("disk".to_owned())).into();
        assert!(matches!(err, DepcheckError::Store(StoreError::Backend(_))));
    }

    #[test]
    fn not_found_converts() {
        let err: DepcheckError = AllowListStoreError::NotFound("X".to_owned()).into();
        assert!(matches!(
            err,
            DepcheckError::AllowList(AllowListError::NotFound(_))
        ));
    }
}
