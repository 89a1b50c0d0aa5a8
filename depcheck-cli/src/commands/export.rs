//! `depcheck export` command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use depcheck_core::config::DepcheckConfig;
use depcheck_core::store::{DependencyGraph, MeasureStore, SettingsStore};
use depcheck_core::types::SnapshotId;
use depcheck_report::{DependencyReportError, Reconciler, ReportRow, csv_file_name, write_csv};

use crate::cli::ExportArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `export` command.
///
/// Without `--out` the CSV goes to stdout; with it the file is written into
/// that directory and a short summary is printed instead.
pub fn execute(
    args: ExportArgs,
    config: &DepcheckConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let (graph, measures) = super::load_analysis(config)?;
    let settings = super::open_settings(config);
    let snapshot_id = SnapshotId(args.snapshot_id);

    let export = build_export(&graph, &measures, &settings, snapshot_id, args.name.as_deref())?;

    match args.out {
        Some(dir) => {
            let summary = write_export(&export, &dir, &config.report.csv_extension)?;
            writer.render(&summary)
        }
        None => writer.render(&export),
    }
}

/// Collect the CSV rows of a snapshot and the display name used for the file.
pub fn build_export(
    graph: &dyn DependencyGraph,
    measures: &dyn MeasureStore,
    settings: &dyn SettingsStore,
    snapshot_id: SnapshotId,
    name: Option<&str>,
) -> Result<CsvExport, CliError> {
    let rows = Reconciler::new(graph, measures, settings).csv_rows(snapshot_id)?;

    let display_name = match name {
        Some(name) => name.to_owned(),
        None => graph
            .snapshot(snapshot_id)?
            .map(|snapshot| snapshot.name)
            .ok_or_else(|| DependencyReportError::NotFound(snapshot_id.to_string()))?,
    };

    Ok(CsvExport { display_name, rows })
}

/// Write the CSV file into `dir`, creating the directory if needed.
pub fn write_export(
    export: &CsvExport,
    dir: &Path,
    extension: &str,
) -> Result<ExportSummary, CliError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(csv_file_name(&export.display_name, extension));

    let file = std::fs::File::create(&path)?;
    write_csv(&export.rows, std::io::BufWriter::new(file))?;

    info!(path = %path.display(), rows = export.rows.len(), "csv export written");
    Ok(ExportSummary {
        path,
        rows: export.rows.len(),
    })
}

/// Rows to export; rendered as raw CSV in text mode.
#[derive(Serialize)]
pub struct CsvExport {
    pub display_name: String,
    pub rows: Vec<ReportRow>,
}

impl Render for CsvExport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        write_csv(&self.rows, w).map_err(|e| std::io::Error::other(e.to_string()))
    }
}

/// Result of writing an export file.
#[derive(Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
}

impl Render for ExportSummary {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Exported {} rows to {}", self.rows, self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depcheck_core::keys;
    use depcheck_core::store::{MemoryDependencyGraph, MemoryMeasureStore, MemorySettingsStore};
    use depcheck_core::types::{DependencyEdge, Qualifier, ResourceScope, Snapshot, Usage};

    fn edge(name: &str, key: &str, usage: Usage) -> DependencyEdge {
        DependencyEdge {
            consumer_snapshot_id: SnapshotId(5),
            consumer_key: "org.acme:tool".to_owned(),
            target_key: key.to_owned(),
            target_name: name.to_owned(),
            target_version: "2.0".to_owned(),
            usage,
            target_scope: ResourceScope::Project,
        }
    }

    fn fixture() -> (MemoryDependencyGraph, MemoryMeasureStore, MemorySettingsStore) {
        let graph = MemoryDependencyGraph::new(
            vec![Snapshot {
                id: SnapshotId(5),
                key: "org.acme:tool".to_owned(),
                name: "Acme Tool / CLI".to_owned(),
                qualifier: Qualifier::Module,
                scope: ResourceScope::Project,
                root_snapshot_id: None,
            }],
            vec![
                edge("Jackson, Core", "com.fasterxml:jackson-core", Usage::Compile),
                edge("Mockito", "org.mockito:mockito-core", Usage::Test),
            ],
        );
        let mut measures = MemoryMeasureStore::new();
        measures.insert(
            SnapshotId(5),
            keys::MEASURE_DEPENDENCY,
            Some(
                "com.fasterxml:jackson-core~Apache-2.0~OK;org.mockito:mockito-core~MIT~OK"
                    .to_owned(),
            ),
        );
        let settings = MemorySettingsStore::with_values([(keys::SCOPE_COMPILE, "true")]);
        (graph, measures, settings)
    }

    #[test]
    fn test_export_uses_snapshot_name_by_default() {
        let (graph, measures, settings) = fixture();
        let export = build_export(&graph, &measures, &settings, SnapshotId(5), None)
            .expect("export should build");
        assert_eq!(export.display_name, "Acme Tool / CLI");
        assert_eq!(export.rows.len(), 1, "test scope is disabled");
        assert!(export.rows[0].usage.is_none(), "csv rows carry no usage");
    }

    #[test]
    fn test_export_text_is_raw_csv() {
        let (graph, measures, settings) = fixture();
        let export = build_export(&graph, &measures, &settings, SnapshotId(5), None)
            .expect("export should build");

        let mut buffer = Vec::new();
        export.render_text(&mut buffer).expect("render");
        assert_eq!(
            String::from_utf8(buffer).expect("valid UTF-8"),
            "\"Jackson, Core\",2.0,Apache-2.0,OK\n"
        );
    }

    #[test]
    fn test_write_export_creates_sanitized_file() {
        let (graph, measures, settings) = fixture();
        let export = build_export(&graph, &measures, &settings, SnapshotId(5), None)
            .expect("export should build");

        let dir = tempfile::tempdir().expect("temp dir");
        let out = dir.path().join("reports");
        let summary = write_export(&export, &out, "csv").expect("export should be written");

        assert_eq!(summary.rows, 1);
        assert_eq!(summary.path, out.join("Acme_Tool___CLI.csv"));
        let written = std::fs::read_to_string(&summary.path).expect("read export");
        assert_eq!(written, "\"Jackson, Core\",2.0,Apache-2.0,OK\n");
    }

    #[test]
    fn test_export_name_override() {
        let (graph, measures, settings) = fixture();
        let export = build_export(&graph, &measures, &settings, SnapshotId(5), Some("release"))
            .expect("export should build");
        assert_eq!(export.display_name, "release");
    }

    #[test]
    fn test_export_unknown_snapshot() {
        let (graph, measures, settings) = fixture();
        let err = build_export(&graph, &measures, &settings, SnapshotId(6), None)
            .err()
            .expect("unknown snapshot should fail");
        assert_eq!(err.exit_code(), 4);
    }
}
