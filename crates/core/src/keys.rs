//! 저장소 키 상수
//!
//! settings 저장소와 measure 저장소가 공유하는 문자열 키입니다.

/// 전역 허용 의존성 XML (root `<allowed-dependencies>`)
pub const LIBRARY_GLOBAL: &str = "dependencycheck.lib.global";

/// 프로젝트별 허용 의존성 XML (legacy, deprecated)
pub const LIBRARY_PROJECT: &str = "dependencycheck.lib.project";

/// 허용 라이선스 XML (root `<licenses>`)
pub const LICENSES: &str = "dependencycheck.license";

/// compile 범위 활성화 플래그
pub const SCOPE_COMPILE: &str = "dependencycheck.scope.compile";

/// provided 범위 활성화 플래그
pub const SCOPE_PROVIDED: &str = "dependencycheck.scope.provided";

/// runtime 범위 활성화 플래그
pub const SCOPE_RUNTIME: &str = "dependencycheck.scope.runtime";

/// test 범위 활성화 플래그
pub const SCOPE_TEST: &str = "dependencycheck.scope.test";

/// 스냅샷별 스캔 결과 measure (`key~license~status;...`)
pub const MEASURE_DEPENDENCY: &str = "dependencycheck.dependency";

/// 스냅샷별 라이선스 요약 measure (`title~url;...`)
pub const MEASURE_LICENSE: &str = "dependencycheck.license";
