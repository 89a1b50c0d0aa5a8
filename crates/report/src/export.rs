//! 리포트 내보내기: CSV 및 표 형태 데이터
//!
//! 비즈니스 로직 없이 [`ReportRow`]를 형식화만 합니다.
//! CSV는 헤더 없이 `name,[usage,]version,license,status` 순으로 씁니다.

use std::io::Write;

use serde::Serialize;

use crate::error::DependencyReportError;
use crate::reconcile::ReportRow;

/// 프로젝트 이름이 비어 있을 때 쓰는 파일 이름
pub const DEFAULT_FILE_STEM: &str = "dependencies";

/// 행 목록을 헤더 없는 CSV로 씁니다.
///
/// 사용 범위는 행에 값이 있을 때만 두 번째 열로 들어갑니다.
pub fn write_csv<W: Write>(rows: &[ReportRow], writer: W) -> Result<(), DependencyReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        let record = match row.usage {
            Some(usage) => vec![
                row.name.as_str(),
                usage.as_str(),
                row.version.as_str(),
                row.license.as_str(),
                row.status.as_str(),
            ],
            None => vec![
                row.name.as_str(),
                row.version.as_str(),
                row.license.as_str(),
                row.status.as_str(),
            ],
        };
        wtr.write_record(&record)
            .map_err(|e| DependencyReportError::Export(e.to_string()))?;
    }
    wtr.flush()
        .map_err(|e| DependencyReportError::Export(e.to_string()))
}

/// 행 목록을 CSV 문자열로 변환합니다.
pub fn to_csv_string(rows: &[ReportRow]) -> Result<String, DependencyReportError> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    String::from_utf8(buf).map_err(|e| DependencyReportError::Export(e.to_string()))
}

/// 프로젝트 표시 이름에서 내보내기 파일 이름을 만듭니다.
///
/// `[A-Za-z0-9._-]` 외의 문자는 `_`로 바꾸고, 확장자가 없으면 `extension`을 붙입니다.
pub fn csv_file_name(display_name: &str, extension: &str) -> String {
    let sanitized: String = display_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let stem = if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        DEFAULT_FILE_STEM.to_owned()
    } else {
        sanitized
    };

    let suffix = format!(".{extension}");
    if stem.to_ascii_lowercase().ends_with(&suffix.to_ascii_lowercase()) {
        stem
    } else {
        format!("{stem}{suffix}")
    }
}

/// 화면 표시용 표 데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    /// 열 제목
    pub headers: Vec<&'static str>,
    /// 셀 값 (행 단위)
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// 행 목록에서 표를 만듭니다. 어떤 행이든 사용 범위가 있으면 Usage 열을 포함합니다.
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        let with_usage = rows.iter().any(|row| row.usage.is_some());
        let headers = if with_usage {
            vec!["Name", "Usage", "Version", "License", "Status"]
        } else {
            vec!["Name", "Version", "License", "Status"]
        };

        let rows = rows
            .iter()
            .map(|row| {
                let mut cells = vec![row.name.clone()];
                if with_usage {
                    cells.push(row.usage.map(|u| u.to_string()).unwrap_or_default());
                }
                cells.push(row.version.clone());
                cells.push(row.license.clone());
                cells.push(row.status.clone());
                cells
            })
            .collect();

        Self { headers, rows }
    }

    /// 행 수
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
