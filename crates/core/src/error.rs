//! 에러 타입: 도메인별 에러 정의

/// Depcheck 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum DepcheckError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 저장소(settings / measure / graph) 에러
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// 리포트 생성 에러
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// 허용 목록 에러
    #[error("allow-list error: {0}")]
    AllowList(#[from] AllowListError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 외부 저장소 에러
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 저장소 백엔드 접근 실패 (파일, 연결 등)
    #[error("backend failure: {0}")]
    Backend(String),

    /// 저장된 데이터 형식이 잘못됨
    #[error("corrupt data for '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// 낙관적 동시성 검사 실패: 읽은 뒤 다른 세션이 값을 바꿈
    #[error("concurrent modification of '{key}': expected revision {expected:?}, found {actual:?}")]
    Conflict {
        key: String,
        expected: Option<u64>,
        actual: Option<u64>,
    },
}

/// 리포트 생성 에러
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// 스냅샷을 찾을 수 없음
    #[error("not found: {0}")]
    NotFound(String),

    /// 스캔 결과 measure 자체가 없음
    #[error("missing scan result: {0}")]
    MissingScanResult(String),

    /// 스캔 결과 문자열 파싱 실패
    #[error("malformed scan result: {0}")]
    Malformed(String),
}

/// 허용 목록 에러
#[derive(Debug, thiserror::Error)]
pub enum AllowListError {
    /// 불변식 위반 (중복 라이선스, 사용 중인 라이선스, 잘못된 인덱스 등)
    #[error("validation failed: {0}")]
    Validation(String),

    /// 대상이 존재하지 않음
    #[error("not found: {0}")]
    NotFound(String),

    /// 저장된 XML 문서 처리 실패
    #[error("document error: {0}")]
    Document(String),

    /// 동시 수정 충돌
    #[error("conflict: {0}")]
    Conflict(String),
}
