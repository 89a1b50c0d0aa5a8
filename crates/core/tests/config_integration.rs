//! depcheck.toml 통합 설정 테스트
//!
//! - depcheck.toml.example 파싱 테스트
//! - 부분 설정 (일부 섹션만) 로딩 테스트
//! - 환경변수 우선순위 테스트
//! - 빈 파일 / 잘못된 형식 에러 테스트

use depcheck_core::config::DepcheckConfig;
use depcheck_core::error::{ConfigError, DepcheckError};

// =============================================================================
// depcheck.toml.example 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let content = include_str!("../../../depcheck.toml.example");
    let config = DepcheckConfig::parse(content).expect("example config should parse");

    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.general.log_format, "pretty");
    assert_eq!(config.store.settings_path, "depcheck-settings.toml");
    assert_eq!(config.store.analysis_path, "analysis.json");
}

#[test]
fn example_config_passes_validation() {
    let content = include_str!("../../../depcheck.toml.example");
    let config = DepcheckConfig::parse(content).expect("should parse");
    config
        .validate()
        .expect("example config should pass validation");
}

#[test]
fn example_config_matches_code_defaults() {
    let content = include_str!("../../../depcheck.toml.example");
    let example = DepcheckConfig::parse(content).expect("should parse");
    let defaults = DepcheckConfig::default();

    assert_eq!(example.general.log_level, defaults.general.log_level);
    assert_eq!(example.general.log_format, defaults.general.log_format);
    assert_eq!(example.store.settings_path, defaults.store.settings_path);
    assert_eq!(example.store.analysis_path, defaults.store.analysis_path);
    assert_eq!(example.report.csv_extension, defaults.report.csv_extension);
    assert_eq!(
        example.report.legacy_project_allowlist,
        defaults.report.legacy_project_allowlist
    );
}

// =============================================================================
// 부분 설정 테스트
// =============================================================================

#[test]
fn partial_config_store_only() {
    let toml = r#"
[store]
settings_path = "/var/lib/depcheck/settings.toml"
"#;
    let config = DepcheckConfig::parse(toml).expect("should parse");
    assert_eq!(config.store.settings_path, "/var/lib/depcheck/settings.toml");
    assert_eq!(config.store.analysis_path, "analysis.json");
    assert_eq!(config.general.log_level, "info");
}

#[test]
fn partial_config_two_sections() {
    let toml = r#"
[general]
log_format = "json"

[report]
csv_extension = "txt"
"#;
    let config = DepcheckConfig::parse(toml).expect("should parse");
    assert_eq!(config.general.log_format, "json");
    assert_eq!(config.report.csv_extension, "txt");
    assert!(!config.report.legacy_project_allowlist);
    config.validate().expect("should validate");
}

// =============================================================================
// 환경변수 우선순위 테스트
// =============================================================================

#[test]
#[serial_test::serial]
fn env_override_takes_precedence_over_toml() {
    let toml = r#"
[general]
log_level = "info"
"#;

    let original = std::env::var("DEPCHECK_GENERAL_LOG_LEVEL").ok();
    // SAFETY: serial 테스트로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("DEPCHECK_GENERAL_LOG_LEVEL", "error");
    }

    let mut config = DepcheckConfig::parse(toml).expect("should parse");
    config.apply_env_overrides();
    let result = config.general.log_level.clone();

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var("DEPCHECK_GENERAL_LOG_LEVEL", val),
            None => std::env::remove_var("DEPCHECK_GENERAL_LOG_LEVEL"),
        }
    }

    assert_eq!(result, "error");
}

#[test]
#[serial_test::serial]
fn env_override_store_section() {
    let original = std::env::var("DEPCHECK_STORE_ANALYSIS_PATH").ok();
    // SAFETY: serial 테스트로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("DEPCHECK_STORE_ANALYSIS_PATH", "/tmp/other.json");
    }

    let mut config = DepcheckConfig::default();
    config.apply_env_overrides();
    let result = config.store.analysis_path.clone();

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var("DEPCHECK_STORE_ANALYSIS_PATH", val),
            None => std::env::remove_var("DEPCHECK_STORE_ANALYSIS_PATH"),
        }
    }

    assert_eq!(result, "/tmp/other.json");
}

#[test]
#[serial_test::serial]
fn load_applies_env_and_validates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("depcheck.toml");
    std::fs::write(&path, "[general]\nlog_level = \"debug\"\n").expect("write");

    let original = std::env::var("DEPCHECK_GENERAL_LOG_FORMAT").ok();
    // SAFETY: serial 테스트로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("DEPCHECK_GENERAL_LOG_FORMAT", "yaml");
    }

    let result = DepcheckConfig::load(&path);

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var("DEPCHECK_GENERAL_LOG_FORMAT", val),
            None => std::env::remove_var("DEPCHECK_GENERAL_LOG_FORMAT"),
        }
    }

    let err = result.expect_err("invalid env value must fail validation");
    assert!(matches!(
        err,
        DepcheckError::Config(ConfigError::InvalidValue { .. })
    ));
}

// =============================================================================
// 에러 테스트
// =============================================================================

#[test]
fn empty_string_parses_with_defaults() {
    let config = DepcheckConfig::parse("").expect("empty should parse");
    assert_eq!(config.general.log_level, "info");
}

#[test]
fn comments_only_parses_with_defaults() {
    let config = DepcheckConfig::parse("# nothing here\n# still nothing\n").expect("should parse");
    assert_eq!(config.report.csv_extension, "csv");
}

#[test]
fn invalid_type_returns_parse_error() {
    let toml = r#"
[report]
legacy_project_allowlist = "maybe"
"#;
    let err = DepcheckConfig::parse(toml).expect_err("should fail");
    assert!(matches!(
        err,
        DepcheckError::Config(ConfigError::ParseFailed { .. })
    ));
}

#[test]
fn unknown_section_is_ignored() {
    let toml = r#"
[general]
log_level = "warn"

[future_section]
something = 1
"#;
    let config = DepcheckConfig::parse(toml).expect("should parse");
    assert_eq!(config.general.log_level, "warn");
}

#[test]
fn from_file_nonexistent_returns_file_not_found() {
    let err = DepcheckConfig::from_file("/nonexistent/depcheck.toml").expect_err("should fail");
    assert!(matches!(
        err,
        DepcheckError::Config(ConfigError::FileNotFound { .. })
    ));
}

#[test]
#[serial_test::serial]
fn load_or_default_without_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config =
        DepcheckConfig::load_or_default(dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(config.store.settings_path, "depcheck-settings.toml");
}

#[test]
fn serialize_and_reparse_roundtrip() {
    let mut config = DepcheckConfig::default();
    config.report.legacy_project_allowlist = true;
    let serialized = toml::to_string_pretty(&config).expect("serialize");
    let parsed = DepcheckConfig::parse(&serialized).expect("reparse");
    assert!(parsed.report.legacy_project_allowlist);
}
