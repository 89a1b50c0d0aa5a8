//! TOML 파일 기반 settings 저장소
//!
//! 파일 전체를 읽고, 메모리에서 수정한 뒤, 임시 파일을 거쳐 통째로 교체합니다.
//! 쓰기는 형제 파일 `<path>.lock`의 OS advisory lock을 잡은 채로
//! 읽기-검사-쓰기 전체를 수행하므로, 여러 프로세스가 같은 파일을 열어도
//! 리비전 검사가 유효합니다.
//!
//! ```toml
//! [values."dependencycheck.scope.compile"]
//! value = "true"
//! revision = 1
//! ```

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fd_lock::RwLock;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::StoreError;
use crate::store::{Revision, SettingsStore, StoredValue};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    values: BTreeMap<String, FileEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FileEntry {
    value: String,
    revision: Revision,
}

/// TOML 파일 기반 settings 저장소
///
/// 파일이 없으면 빈 저장소로 취급하고, 첫 쓰기 시 생성합니다.
/// 쓰기는 핸들이나 프로세스와 무관하게 lock 파일로 직렬화됩니다.
/// 읽기는 rename이 원자적이므로 잠그지 않습니다.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// 주어진 경로의 저장소를 엽니다. 파일은 아직 없어도 됩니다.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 저장소 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn open_lock_file(&self) -> Result<File, StoreError> {
        let lock_path = self.lock_path();
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| {
                StoreError::Backend(format!("failed to open {}: {e}", lock_path.display()))
            })
    }

    fn read_file(&self) -> Result<SettingsFile, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SettingsFile::default());
            }
            Err(e) => {
                return Err(StoreError::Backend(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        toml::from_str(&content).map_err(|e| StoreError::Corrupt {
            key: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn write_file(&self, file: &SettingsFile) -> Result<(), StoreError> {
        let content = toml::to_string_pretty(file).map_err(|e| {
            StoreError::Backend(format!("failed to serialize settings: {e}"))
        })?;

        let dir = self.parent_dir();
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
            StoreError::Backend(format!("failed to create temp file in {}: {e}", dir.display()))
        })?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| {
                StoreError::Backend(format!("failed to write {}: {e}", tmp.path().display()))
            })?;
        tmp.persist(&self.path).map_err(|e| {
            StoreError::Backend(format!(
                "failed to replace {}: {}",
                self.path.display(),
                e.error
            ))
        })?;
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        let file = self.read_file()?;
        Ok(file.values.get(key).map(|entry| StoredValue {
            value: entry.value.clone(),
            revision: entry.revision,
        }))
    }

    fn put(
        &self,
        key: &str,
        value: &str,
        expected: Option<Revision>,
    ) -> Result<Revision, StoreError> {
        // 잠금은 읽기부터 교체까지 유지되어야 합니다
        let mut lock = RwLock::new(self.open_lock_file()?);
        let _guard = lock.write().map_err(|e| {
            StoreError::Backend(format!(
                "failed to lock {}: {e}",
                self.lock_path().display()
            ))
        })?;

        let mut file = self.read_file()?;
        let actual = file.values.get(key).map(|entry| entry.revision);
        if actual != expected {
            return Err(StoreError::Conflict {
                key: key.to_owned(),
                expected,
                actual,
            });
        }

        let revision = actual.unwrap_or(0) + 1;
        file.values.insert(
            key.to_owned(),
            FileEntry {
                value: value.to_owned(),
                revision,
            },
        );
        self.write_file(&file)?;

        debug!(key, revision, path = %self.path.display(), "settings value written");
        Ok(revision)
    }
}
