//! 스코프 필터: 활성화된 의존성 사용 범위 결정
//!
//! 네 개의 bool 설정(`dependencycheck.scope.{compile,provided,runtime,test}`)에서
//! 활성 사용 범위 집합을 만듭니다. 설정이 없으면 비활성으로 간주합니다.

use serde::{Deserialize, Serialize};
use tracing::debug;

use depcheck_core::error::StoreError;
use depcheck_core::keys;
use depcheck_core::store::SettingsStore;
use depcheck_core::types::Usage;

/// 사용 범위별 settings 키
pub fn scope_key(usage: Usage) -> &'static str {
    match usage {
        Usage::Compile => keys::SCOPE_COMPILE,
        Usage::Provided => keys::SCOPE_PROVIDED,
        Usage::Runtime => keys::SCOPE_RUNTIME,
        Usage::Test => keys::SCOPE_TEST,
    }
}

/// 활성화된 사용 범위 집합
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSet {
    pub compile: bool,
    pub provided: bool,
    pub runtime: bool,
    pub test: bool,
}

impl ScopeSet {
    /// 모든 범위가 활성화된 집합
    pub fn all() -> Self {
        Self {
            compile: true,
            provided: true,
            runtime: true,
            test: true,
        }
    }

    /// 주어진 사용 범위만 활성화된 집합을 만듭니다.
    pub fn from_usages(usages: impl IntoIterator<Item = Usage>) -> Self {
        let mut set = Self::default();
        for usage in usages {
            set.set(usage, true);
        }
        set
    }

    /// 사용 범위가 활성화되어 있는지 확인합니다.
    pub fn contains(&self, usage: Usage) -> bool {
        match usage {
            Usage::Compile => self.compile,
            Usage::Provided => self.provided,
            Usage::Runtime => self.runtime,
            Usage::Test => self.test,
        }
    }

    /// 사용 범위의 활성 여부를 바꿉니다.
    pub fn set(&mut self, usage: Usage, enabled: bool) {
        match usage {
            Usage::Compile => self.compile = enabled,
            Usage::Provided => self.provided = enabled,
            Usage::Runtime => self.runtime = enabled,
            Usage::Test => self.test = enabled,
        }
    }

    /// 활성화된 사용 범위 목록 (compile, provided, runtime, test 순)
    pub fn usages(&self) -> Vec<Usage> {
        Usage::ALL
            .into_iter()
            .filter(|usage| self.contains(*usage))
            .collect()
    }

    /// 활성화된 범위가 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        !(self.compile || self.provided || self.runtime || self.test)
    }
}

/// settings 저장소에서 활성 범위를 읽습니다.
pub fn load_scopes(settings: &dyn SettingsStore) -> Result<ScopeSet, StoreError> {
    let mut scopes = ScopeSet::default();
    for usage in Usage::ALL {
        scopes.set(usage, settings.get_bool(scope_key(usage))?);
    }
    debug!(?scopes, "enabled scopes loaded");
    Ok(scopes)
}

/// 활성 범위를 settings 저장소에 기록합니다.
///
/// 네 개의 플래그를 각각 덮어씁니다.
pub fn save_scopes(settings: &dyn SettingsStore, scopes: &ScopeSet) -> Result<(), StoreError> {
    for usage in Usage::ALL {
        settings.set_bool(scope_key(usage), scopes.contains(usage))?;
    }
    debug!(?scopes, "enabled scopes saved");
    Ok(())
}
