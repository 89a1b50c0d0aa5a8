#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod keys;
pub mod metrics;
pub mod store;
pub mod types;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{AllowListError, ConfigError, DepcheckError, ReportError, StoreError};

// 설정
pub use config::DepcheckConfig;

// 저장소 trait
pub use store::{DependencyGraph, Measure, MeasureStore, Revision, SettingsStore, StoredValue};

// 도메인 타입
pub use types::{
    DependencyEdge, EdgeQuery, Qualifier, ResourceScope, Snapshot, SnapshotId, Usage,
};
