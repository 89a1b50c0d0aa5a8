//! 허용 목록 문서: 타입 정의와 순수 변환
//!
//! 저장소와 직렬화에서 분리된 메모리 표현입니다. 모든 변환은 실패 시
//! 문서를 바꾸지 않습니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AllowListStoreError;

/// 라이선스 소스 유형
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    /// 비공개 소스
    Closed,
    /// 카피레프트 오픈소스
    #[default]
    OpensourceCopyleft,
    /// 카피레프트가 없는 오픈소스
    OpensourceNoCopyleft,
}

impl SourceType {
    /// 모든 유형 (폼 선택지 순서)
    pub const ALL: [SourceType; 3] = [
        SourceType::Closed,
        SourceType::OpensourceCopyleft,
        SourceType::OpensourceNoCopyleft,
    ];

    /// 모든 유형 이름
    pub fn all() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.as_str()).collect()
    }

    /// 저장 형식 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "CLOSED",
            Self::OpensourceCopyleft => "OPENSOURCE_COPYLEFT",
            Self::OpensourceNoCopyleft => "OPENSOURCE_NO_COPYLEFT",
        }
    }

    /// 저장된 값을 해석합니다. 알 수 없거나 빈 값은 기본값입니다.
    pub fn from_stored(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for SourceType {
    type Err = AllowListStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| AllowListStoreError::InvalidField {
                field: "sourceType".to_owned(),
                reason: format!("'{s}' is not one of {}", Self::all().join(", ")),
            })
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 허용된 의존성
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowedDependency {
    /// 아티팩트 키
    pub key: String,
    /// 허용 버전 범위 (예: `[1.0,2.0)`)
    pub version_range: String,
    /// 적용 라이선스 ID
    pub license_id: String,
}

impl AllowedDependency {
    pub fn new(
        key: impl Into<String>,
        version_range: impl Into<String>,
        license_id: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            version_range: version_range.into(),
            license_id: license_id.into(),
        }
    }
}

/// 허용된 라이선스
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    /// 고유 ID
    pub id: String,
    /// 이름
    pub title: String,
    /// 설명 (마크업을 포함할 수 있으며 그대로 보존)
    pub description: String,
    /// 본문 URL
    pub url: String,
    /// 소스 유형
    pub source_type: SourceType,
    /// 상용 여부
    pub commercial: bool,
}

/// 허용 의존성 문서 (`<allowed-dependencies>`)
///
/// 의존성은 문서 내 위치(0부터)로 식별됩니다. 삭제 후 인덱스가 밀리므로
/// 변경 전에 항상 다시 조회해야 합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyDocument {
    pub dependencies: Vec<AllowedDependency>,
}

impl DependencyDocument {
    /// 의존성을 끝에 추가하고 그 인덱스를 반환합니다. 중복을 허용합니다.
    pub fn add(&mut self, dependency: AllowedDependency) -> Result<usize, AllowListStoreError> {
        if dependency.key.trim().is_empty() {
            return Err(AllowListStoreError::InvalidField {
                field: "key".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }
        self.dependencies.push(dependency);
        Ok(self.dependencies.len() - 1)
    }

    /// 인덱스 위치의 의존성을 제거합니다.
    pub fn remove(&mut self, index: usize) -> Result<AllowedDependency, AllowListStoreError> {
        if index >= self.dependencies.len() {
            return Err(AllowListStoreError::IndexOutOfRange {
                index,
                len: self.dependencies.len(),
            });
        }
        Ok(self.dependencies.remove(index))
    }

    /// 라이선스 ID를 참조하는 의존성 수
    pub fn references_to(&self, license_id: &str) -> usize {
        self.dependencies
            .iter()
            .filter(|d| d.license_id == license_id)
            .count()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AllowedDependency> {
        self.dependencies.iter()
    }
}

/// 허용 라이선스 문서 (`<licenses>`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LicenseDocument {
    pub licenses: Vec<License>,
}

impl LicenseDocument {
    /// 라이선스를 추가합니다. 같은 ID가 있으면 실패합니다.
    pub fn add(&mut self, license: License) -> Result<(), AllowListStoreError> {
        if license.id.trim().is_empty() {
            return Err(AllowListStoreError::InvalidField {
                field: "id".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }
        if self.get(&license.id).is_some() {
            return Err(AllowListStoreError::LicenseAlreadyExists(license.id));
        }
        self.licenses.push(license);
        Ok(())
    }

    /// 라이선스를 제거합니다.
    ///
    /// `users` 중 하나라도 이 ID를 참조하면 `LicenseInUse`로 실패합니다.
    pub fn remove(
        &mut self,
        id: &str,
        users: &[&DependencyDocument],
    ) -> Result<License, AllowListStoreError> {
        let dependencies: usize = users.iter().map(|doc| doc.references_to(id)).sum();
        if dependencies > 0 {
            return Err(AllowListStoreError::LicenseInUse {
                license_id: id.to_owned(),
                dependencies,
            });
        }

        let position = self
            .licenses
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| AllowListStoreError::NotFound(id.to_owned()))?;
        Ok(self.licenses.remove(position))
    }

    /// ID로 조회합니다.
    pub fn get(&self, id: &str) -> Option<&License> {
        self.licenses.iter().find(|l| l.id == id)
    }

    /// 이름에 `name`이 포함되거나 ID가 `name`과 같은 첫 라이선스
    pub fn find_by_name_or_id(&self, name: &str) -> Option<&License> {
        self.licenses
            .iter()
            .find(|l| l.title.contains(name) || l.id == name)
    }

    /// 문서 순서대로 ID 목록
    pub fn ids(&self) -> Vec<&str> {
        self.licenses.iter().map(|l| l.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.licenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.licenses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &License> {
        self.licenses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn license(id: &str, title: &str) -> License {
        License {
            id: id.to_owned(),
            title: title.to_owned(),
            description: String::new(),
            url: String::new(),
            source_type: SourceType::default(),
            commercial: false,
        }
    }

    #[test]
    fn source_type_parses_case_insensitively() {
        assert_eq!(
            "opensource_no_copyleft".parse::<SourceType>().unwrap(),
            SourceType::OpensourceNoCopyleft
        );
        assert!("proprietary".parse::<SourceType>().is_err());
    }

    #[test]
    fn unknown_stored_source_type_defaults_to_copyleft() {
        assert_eq!(SourceType::from_stored(""), SourceType::OpensourceCopyleft);
        assert_eq!(SourceType::from_stored("???"), SourceType::OpensourceCopyleft);
        assert_eq!(SourceType::from_stored("CLOSED"), SourceType::Closed);
    }

    #[test]
    fn source_type_names() {
        assert_eq!(
            SourceType::all(),
            vec!["CLOSED", "OPENSOURCE_COPYLEFT", "OPENSOURCE_NO_COPYLEFT"]
        );
    }

    #[test]
    fn add_dependency_allows_duplicates() {
        let mut doc = DependencyDocument::default();
        let dep = AllowedDependency::new("org.acme:lib", "[1.0,2.0)", "MIT");
        assert_eq!(doc.add(dep.clone()).unwrap(), 0);
        assert_eq!(doc.add(dep).unwrap(), 1);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn add_dependency_rejects_empty_key() {
        let mut doc = DependencyDocument::default();
        let err = doc.add(AllowedDependency::new(" ", "1.0", "MIT")).unwrap_err();
        assert!(matches!(err, AllowListStoreError::InvalidField { .. }));
        assert!(doc.is_empty());
    }

    #[test]
    fn remove_out_of_range_leaves_document() {
        let mut doc = DependencyDocument::default();
        for key in ["a", "b", "c"] {
            doc.add(AllowedDependency::new(key, "1.0", "MIT")).unwrap();
        }
        let before = doc.clone();
        let err = doc.remove(5).unwrap_err();
        assert!(matches!(
            err,
            AllowListStoreError::IndexOutOfRange { index: 5, len: 3 }
        ));
        assert_eq!(doc, before);
    }

    #[test]
    fn remove_shifts_following_indices() {
        let mut doc = DependencyDocument::default();
        for key in ["a", "b", "c"] {
            doc.add(AllowedDependency::new(key, "1.0", "MIT")).unwrap();
        }
        assert_eq!(doc.remove(0).unwrap().key, "a");
        assert_eq!(doc.dependencies[0].key, "b");
    }

    #[test]
    fn duplicate_license_id_is_rejected() {
        let mut doc = LicenseDocument::default();
        doc.add(license("X", "First")).unwrap();
        let before = doc.clone();
        let err = doc.add(license("X", "Second")).unwrap_err();
        assert!(matches!(err, AllowListStoreError::LicenseAlreadyExists(id) if id == "X"));
        assert_eq!(doc, before);
    }

    #[test]
    fn license_in_use_cannot_be_removed() {
        let mut licenses = LicenseDocument::default();
        licenses.add(license("X", "Ex")).unwrap();
        let mut deps = DependencyDocument::default();
        deps.add(AllowedDependency::new("org.acme:lib", "1.0", "X"))
            .unwrap();

        let err = licenses.remove("X", &[&deps]).unwrap_err();
        assert!(matches!(
            err,
            AllowListStoreError::LicenseInUse { dependencies: 1, .. }
        ));
        assert_eq!(licenses.len(), 1);
    }

    #[test]
    fn remove_unused_license() {
        let mut licenses = LicenseDocument::default();
        licenses.add(license("X", "Ex")).unwrap();
        licenses.add(license("Y", "Why")).unwrap();
        let removed = licenses.remove("X", &[&DependencyDocument::default()]).unwrap();
        assert_eq!(removed.id, "X");
        assert_eq!(licenses.ids(), vec!["Y"]);
    }

    #[test]
    fn remove_missing_license_is_not_found() {
        let mut licenses = LicenseDocument::default();
        assert!(matches!(
            licenses.remove("nope", &[]).unwrap_err(),
            AllowListStoreError::NotFound(_)
        ));
    }

    #[test]
    fn find_by_title_substring_or_exact_id() {
        let mut licenses = LicenseDocument::default();
        licenses
            .add(license("Apache-2.0", "Apache License, Version 2.0"))
            .unwrap();
        licenses.add(license("MIT", "MIT License")).unwrap();

        assert_eq!(
            licenses.find_by_name_or_id("Apache License").map(|l| l.id.as_str()),
            Some("Apache-2.0")
        );
        assert_eq!(
            licenses.find_by_name_or_id("MIT").map(|l| l.id.as_str()),
            Some("MIT")
        );
        assert!(licenses.find_by_name_or_id("GPL").is_none());
    }
}
