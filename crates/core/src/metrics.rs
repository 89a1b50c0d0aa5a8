//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()`, `metrics::histogram!()`
//! 매크로를 호출합니다. 레코더가 설치되지 않은 경우 호출은 아무 일도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `depcheck_`
//! - 모듈명: `report_`, `allowlist_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(depcheck_core::metrics::REPORT_GENERATED_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 허용 목록 문서 레이블 키 (dependencies, licenses)
pub const LABEL_DOCUMENT: &str = "document";

/// 결과 레이블 키 (success, failure, conflict)
pub const LABEL_RESULT: &str = "result";

/// 리포트 형식 레이블 키 (table, csv)
pub const LABEL_FORMAT: &str = "format";

// ─── Report 메트릭 ─────────────────────────────────────────────────

/// Report: 생성된 리포트 수 (counter, label: format)
pub const REPORT_GENERATED_TOTAL: &str = "depcheck_report_generated_total";

/// Report: 출력된 행 수 (counter)
pub const REPORT_ROWS_EMITTED_TOTAL: &str = "depcheck_report_rows_emitted_total";

/// Report: 건너뛴 잘못된 스캔 엔트리 수 (counter)
pub const REPORT_MALFORMED_ENTRIES_TOTAL: &str = "depcheck_report_malformed_entries_total";

/// Report: 리포트 생성 시간 (histogram, 초)
pub const REPORT_DURATION_SECONDS: &str = "depcheck_report_duration_seconds";

// ─── Allow-List 메트릭 ─────────────────────────────────────────────

/// Allow-List: 변경 시도 수 (counter, labels: document, result)
pub const ALLOWLIST_MUTATIONS_TOTAL: &str = "depcheck_allowlist_mutations_total";

/// Allow-List: 동시 수정 충돌 수 (counter, label: document)
pub const ALLOWLIST_CONFLICTS_TOTAL: &str = "depcheck_allowlist_conflicts_total";

/// 모든 메트릭의 설명을 등록합니다.
///
/// 레코더 설치 직후 한 번 호출합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    // Report
    describe_counter!(
        REPORT_GENERATED_TOTAL,
        "Total number of dependency reports generated"
    );
    describe_counter!(
        REPORT_ROWS_EMITTED_TOTAL,
        "Total number of report rows emitted after reconciliation"
    );
    describe_counter!(
        REPORT_MALFORMED_ENTRIES_TOTAL,
        "Scan-result entries skipped because they were malformed"
    );
    describe_histogram!(
        REPORT_DURATION_SECONDS,
        "Time spent reconciling a dependency report in seconds"
    );

    // Allow-List
    describe_counter!(
        ALLOWLIST_MUTATIONS_TOTAL,
        "Allow-list mutations attempted, by document and result"
    );
    describe_counter!(
        ALLOWLIST_CONFLICTS_TOTAL,
        "Allow-list writes rejected by concurrent modification"
    );
}
