//! `depcheck report` command handler

use std::io::Write;

use serde::Serialize;
use tracing::{info, warn};

use depcheck_core::config::DepcheckConfig;
use depcheck_core::store::{DependencyGraph, MeasureStore, SettingsStore};
use depcheck_core::types::SnapshotId;
use depcheck_report::{DependencyReport, Reconciler, TableView};

use crate::cli::ReportArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render, write_table};

/// Execute the `report` command.
pub fn execute(
    args: ReportArgs,
    config: &DepcheckConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let (graph, measures) = super::load_analysis(config)?;
    let settings = super::open_settings(config);

    let report = build_report(
        &graph,
        &measures,
        &settings,
        SnapshotId(args.snapshot_id),
        args.strict,
    )?;
    writer.render(&report)
}

/// Build the project report of a snapshot.
///
/// In strict mode the first skipped scan entry turns into an error.
pub fn build_report(
    graph: &dyn DependencyGraph,
    measures: &dyn MeasureStore,
    settings: &dyn SettingsStore,
    snapshot_id: SnapshotId,
    strict: bool,
) -> Result<ProjectReport, CliError> {
    info!(snapshot_id = snapshot_id.0, strict, "generating dependency report");

    let report = Reconciler::new(graph, measures, settings).project_report(snapshot_id)?;
    if strict {
        report.ensure_clean()?;
    } else if !report.diagnostics.is_empty() {
        warn!(
            snapshot_id = snapshot_id.0,
            skipped = report.diagnostics.len(),
            "scan result contains malformed entries"
        );
    }

    Ok(ProjectReport {
        table: TableView::from_rows(&report.rows),
        report,
    })
}

/// Project report output.
#[derive(Serialize)]
pub struct ProjectReport {
    #[serde(flatten)]
    pub report: DependencyReport,
    #[serde(skip)]
    pub table: TableView,
}

impl Render for ProjectReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let snapshot = &self.report.snapshot;
        writeln!(
            w,
            "{} {} ({})",
            "Project:".bold(),
            snapshot.name,
            snapshot.key
        )?;
        writeln!(w)?;

        if self.table.is_empty() {
            writeln!(w, "No dependencies with a scan result in the enabled scopes.")?;
        } else {
            write_table(w, &self.table.headers, &self.table.rows)?;
        }

        writeln!(w)?;
        writeln!(w, "{}", "Licenses:".bold())?;
        if self.report.licenses.is_empty() {
            writeln!(w, "  (none)")?;
        }
        for license in &self.report.licenses {
            if license.url.is_empty() {
                writeln!(w, "  {}", license.title)?;
            } else {
                writeln!(w, "  {} <{}>", license.title, license.url)?;
            }
        }

        if !self.report.diagnostics.is_empty() {
            writeln!(w)?;
            writeln!(
                w,
                "{}",
                format!(
                    "Skipped {} malformed scan entries:",
                    self.report.diagnostics.len()
                )
                .yellow()
            )?;
            for entry in &self.report.diagnostics {
                writeln!(w, "  {}", entry)?;
            }
        }
        Ok(())
    }
}
