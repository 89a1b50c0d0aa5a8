//! 허용 목록 저장소: settings 저장소 위의 읽기-수정-쓰기
//!
//! 문서 전체를 읽어 메모리에서 바꾼 뒤 통째로 다시 씁니다. 쓰기는 읽을 때의
//! 리비전을 기대값으로 넘기므로, 그 사이 다른 세션이 문서를 바꿨다면
//! `StoreError::Conflict`로 실패하고 아무것도 저장되지 않습니다.
//!
//! 저장된 값이 없으면 빈 문서를 만들어 먼저 저장한 뒤 반환합니다.

use tracing::{debug, info, warn};

use depcheck_core::error::StoreError;
use depcheck_core::keys;
use depcheck_core::metrics as m;
use depcheck_core::store::{Revision, SettingsStore};

use crate::document::{AllowedDependency, DependencyDocument, License, LicenseDocument};
use crate::error::AllowListStoreError;
use crate::xml::XmlDocument;

/// 의존성 허용 목록 범위
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllowListScope {
    /// 모든 프로젝트에 적용 (`dependencycheck.lib.global`)
    Global,
    /// 프로젝트별 (`dependencycheck.lib.project`, deprecated)
    Project,
}

impl AllowListScope {
    /// settings 키
    pub fn key(&self) -> &'static str {
        match self {
            Self::Global => keys::LIBRARY_GLOBAL,
            Self::Project => keys::LIBRARY_PROJECT,
        }
    }

    fn metric_label(&self) -> &'static str {
        match self {
            Self::Global => "dependencies",
            Self::Project => "project-dependencies",
        }
    }
}

/// 허용 목록 저장소
///
/// 요청마다 settings 저장소에서 다시 읽으며 캐시를 두지 않습니다.
pub struct AllowListStore<'a> {
    settings: &'a dyn SettingsStore,
    legacy_project: bool,
}

impl<'a> AllowListStore<'a> {
    /// 전역 의존성 목록과 라이선스 목록만 다루는 저장소를 만듭니다.
    pub fn new(settings: &'a dyn SettingsStore) -> Self {
        Self {
            settings,
            legacy_project: false,
        }
    }

    /// 프로젝트별 의존성 목록 사용 여부를 설정합니다.
    pub fn with_legacy_project(mut self, enabled: bool) -> Self {
        self.legacy_project = enabled;
        self
    }

    /// 의존성 허용 목록을 읽습니다.
    pub fn dependencies(
        &self,
        scope: AllowListScope,
    ) -> Result<DependencyDocument, AllowListStoreError> {
        self.check_scope(scope)?;
        Ok(self.load::<DependencyDocument>(scope.key())?.0)
    }

    /// 라이선스 허용 목록을 읽습니다.
    pub fn licenses(&self) -> Result<LicenseDocument, AllowListStoreError> {
        Ok(self.load::<LicenseDocument>(keys::LICENSES)?.0)
    }

    /// 의존성을 추가하고 새 항목의 인덱스를 반환합니다.
    ///
    /// 같은 키/버전 범위의 중복 추가를 허용합니다.
    pub fn add_dependency(
        &self,
        scope: AllowListScope,
        key: &str,
        version_range: &str,
        license_id: &str,
    ) -> Result<usize, AllowListStoreError> {
        self.check_scope(scope)?;
        let dependency = AllowedDependency::new(key.trim(), version_range.trim(), license_id.trim());
        let index = self.mutate::<DependencyDocument, _, _>(
            scope.key(),
            scope.metric_label(),
            |doc| doc.add(dependency.clone()),
        )?;
        info!(
            key = dependency.key.as_str(),
            license_id = dependency.license_id.as_str(),
            index,
            "allowed dependency added"
        );
        Ok(index)
    }

    /// 인덱스 위치의 의존성을 삭제합니다.
    ///
    /// 인덱스는 0부터 시작하며 삭제 후 뒤쪽 항목이 한 칸씩 당겨집니다.
    pub fn delete_dependency(
        &self,
        scope: AllowListScope,
        index: usize,
    ) -> Result<AllowedDependency, AllowListStoreError> {
        self.check_scope(scope)?;
        let removed = self.mutate::<DependencyDocument, _, _>(
            scope.key(),
            scope.metric_label(),
            |doc| doc.remove(index),
        )?;
        info!(key = removed.key.as_str(), index, "allowed dependency deleted");
        Ok(removed)
    }

    /// 라이선스를 추가합니다. 같은 ID가 있으면 `LicenseAlreadyExists`.
    pub fn add_license(&self, license: License) -> Result<(), AllowListStoreError> {
        let license = License {
            id: license.id.trim().to_owned(),
            title: license.title.trim().to_owned(),
            url: license.url.trim().to_owned(),
            ..license
        };
        let id = license.id.clone();
        self.mutate::<LicenseDocument, _, _>(keys::LICENSES, "licenses", |doc| {
            doc.add(license.clone())
        })?;
        info!(license_id = id.as_str(), "allowed license added");
        Ok(())
    }

    /// 라이선스를 삭제합니다.
    ///
    /// 전역 의존성 목록(레거시 사용 시 프로젝트 목록 포함)에서 참조 중이면 `LicenseInUse`.
    /// 참조 검사에 쓴 의존성 목록의 리비전을 쓰기 직전에 다시 확인하므로, 그 사이
    /// 의존성이 추가되었다면 `StoreError::Conflict`로 실패합니다. settings 저장소에
    /// 여러 키를 묶는 트랜잭션이 없어서, 재확인과 라이선스 쓰기 사이의 짧은 구간은
    /// 남습니다.
    pub fn delete_license(&self, id: &str) -> Result<License, AllowListStoreError> {
        let mut user_keys = vec![keys::LIBRARY_GLOBAL];
        if self.legacy_project {
            warn!(key = keys::LIBRARY_PROJECT, "reading deprecated project-scoped allow-list");
            user_keys.push(keys::LIBRARY_PROJECT);
        }
        let mut users = Vec::with_capacity(user_keys.len());
        let mut revisions = Vec::with_capacity(user_keys.len());
        for key in &user_keys {
            let (doc, revision) = self.load::<DependencyDocument>(key)?;
            users.push(doc);
            revisions.push((*key, revision));
        }
        let user_refs: Vec<&DependencyDocument> = users.iter().collect();

        let removed = self.mutate::<LicenseDocument, _, _>(keys::LICENSES, "licenses", |doc| {
            let removed = doc.remove(id, &user_refs)?;
            for (key, revision) in &revisions {
                self.ensure_unchanged(key, *revision)?;
            }
            Ok(removed)
        })?;
        info!(license_id = id, "allowed license deleted");
        Ok(removed)
    }

    /// 읽은 뒤 다른 세션이 문서를 바꿨으면 `StoreError::Conflict`.
    fn ensure_unchanged(&self, key: &str, expected: Revision) -> Result<(), AllowListStoreError> {
        let actual = self.settings.get(key)?.map(|stored| stored.revision);
        if actual != Some(expected) {
            return Err(StoreError::Conflict {
                key: key.to_owned(),
                expected: Some(expected),
                actual,
            }
            .into());
        }
        Ok(())
    }

    fn check_scope(&self, scope: AllowListScope) -> Result<(), AllowListStoreError> {
        if scope == AllowListScope::Project {
            if !self.legacy_project {
                return Err(AllowListStoreError::LegacyDisabled);
            }
            warn!(key = keys::LIBRARY_PROJECT, "accessing deprecated project-scoped allow-list");
        }
        Ok(())
    }

    /// 문서와 그 리비전을 읽습니다. 값이 없으면 빈 문서를 저장합니다.
    fn load<D: XmlDocument>(&self, key: &str) -> Result<(D, Revision), AllowListStoreError> {
        if let Some(stored) = self.settings.get(key)? {
            let doc = D::from_xml(&stored.value).map_err(|e| AllowListStoreError::Document {
                key: key.to_owned(),
                reason: e.to_string(),
            })?;
            return Ok((doc, stored.revision));
        }

        let empty = D::default();
        let xml = empty.to_xml().map_err(|e| AllowListStoreError::Document {
            key: key.to_owned(),
            reason: e.to_string(),
        })?;
        match self.settings.put(key, &xml, None) {
            Ok(revision) => {
                debug!(key, root = D::ROOT, "initialized empty allow-list document");
                Ok((empty, revision))
            }
            // 다른 세션이 먼저 만들었으면 그 값을 사용
            Err(StoreError::Conflict { .. }) => {
                let stored = self.settings.get(key)?.ok_or_else(|| {
                    AllowListStoreError::Store(StoreError::Backend(format!(
                        "'{key}' vanished after concurrent initialization"
                    )))
                })?;
                let doc = D::from_xml(&stored.value).map_err(|e| AllowListStoreError::Document {
                    key: key.to_owned(),
                    reason: e.to_string(),
                })?;
                Ok((doc, stored.revision))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 읽기-수정-쓰기. `apply`가 실패하면 아무것도 쓰지 않습니다.
    fn mutate<D, T, F>(&self, key: &str, label: &'static str, apply: F) -> Result<T, AllowListStoreError>
    where
        D: XmlDocument,
        F: FnOnce(&mut D) -> Result<T, AllowListStoreError>,
    {
        let result = self.try_mutate(key, apply);
        let outcome = match &result {
            Ok(_) => "success",
            Err(e) if e.is_conflict() => {
                metrics::counter!(m::ALLOWLIST_CONFLICTS_TOTAL, m::LABEL_DOCUMENT => label)
                    .increment(1);
                warn!(key, "allow-list changed concurrently, mutation rejected");
                "conflict"
            }
            Err(e) if e.is_validation() => "rejected",
            Err(_) => "failure",
        };
        metrics::counter!(
            m::ALLOWLIST_MUTATIONS_TOTAL,
            m::LABEL_DOCUMENT => label,
            m::LABEL_RESULT => outcome
        )
        .increment(1);
        result
    }

    fn try_mutate<D, T, F>(&self, key: &str, apply: F) -> Result<T, AllowListStoreError>
    where
        D: XmlDocument,
        F: FnOnce(&mut D) -> Result<T, AllowListStoreError>,
    {
        let (mut doc, revision) = self.load::<D>(key)?;
        let output = apply(&mut doc)?;
        let xml = doc.to_xml().map_err(|e| AllowListStoreError::Document {
            key: key.to_owned(),
            reason: e.to_string(),
        })?;
        let new_revision = self.settings.put(key, &xml, Some(revision))?;
        debug!(key, revision = new_revision, "allow-list document written");
        Ok(output)
    }
}
