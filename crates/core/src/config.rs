//! 설정 관리: depcheck.toml 파싱 및 런타임 설정
//!
//! [`DepcheckConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`DEPCHECK_GENERAL_LOG_LEVEL=debug` 형식)
//! 3. 설정 파일 (`depcheck.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), depcheck_core::error::DepcheckError> {
//! use depcheck_core::config::DepcheckConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = DepcheckConfig::load("depcheck.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = DepcheckConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, DepcheckError};

/// Depcheck 통합 설정
///
/// `depcheck.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepcheckConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 저장소 설정
    #[serde(default)]
    pub store: StoreConfig,
    /// 리포트 설정
    #[serde(default)]
    pub report: ReportConfig,
}

impl DepcheckConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DepcheckError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 없으면 기본값에서 시작하는 [`load`](Self::load) 변형입니다.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, DepcheckError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DepcheckError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DepcheckError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                DepcheckError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, DepcheckError> {
        toml::from_str(toml_str).map_err(|e| {
            DepcheckError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `DEPCHECK_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "DEPCHECK_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "DEPCHECK_GENERAL_LOG_FORMAT");

        override_string(&mut self.store.settings_path, "DEPCHECK_STORE_SETTINGS_PATH");
        override_string(&mut self.store.analysis_path, "DEPCHECK_STORE_ANALYSIS_PATH");

        override_string(&mut self.report.csv_extension, "DEPCHECK_REPORT_CSV_EXTENSION");
        override_bool(
            &mut self.report.legacy_project_allowlist,
            "DEPCHECK_REPORT_LEGACY_PROJECT_ALLOWLIST",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), DepcheckError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.store.settings_path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.settings_path".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        if self.store.analysis_path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.analysis_path".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        let ext = &self.report.csv_extension;
        if ext.is_empty() || ext.contains('.') || ext.contains('/') || ext.contains('\\') {
            return Err(ConfigError::InvalidValue {
                field: "report.csv_extension".to_owned(),
                reason: "must be a bare extension such as 'csv'".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 저장소 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// settings 저장소 TOML 파일 경로
    pub settings_path: String,
    /// 분석 결과(그래프 + measure) JSON 파일 경로
    pub analysis_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            settings_path: "depcheck-settings.toml".to_owned(),
            analysis_path: "analysis.json".to_owned(),
        }
    }
}

/// 리포트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// CSV 내보내기 기본 확장자
    pub csv_extension: String,
    /// 프로젝트별 허용 목록(legacy) 사용 여부
    pub legacy_project_allowlist: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            csv_extension: "csv".to_owned(),
            legacy_project_allowlist: false,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}
