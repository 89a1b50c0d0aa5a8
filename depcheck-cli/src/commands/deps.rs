//! `depcheck deps` command handler

use std::io::Write;

use serde::Serialize;

use depcheck_allowlist::{AllowListScope, AllowListStore, AllowedDependency};
use depcheck_core::config::DepcheckConfig;

use crate::cli::{DepsAction, DepsArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render, write_table};

/// Execute the `deps` command.
pub fn execute(
    args: DepsArgs,
    config: &DepcheckConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let settings = super::open_settings(config);
    let store =
        AllowListStore::new(&settings).with_legacy_project(config.report.legacy_project_allowlist);
    let scope = if args.project {
        AllowListScope::Project
    } else {
        AllowListScope::Global
    };

    match args.action {
        DepsAction::List => writer.render(&list(&store, scope)?),
        DepsAction::Add {
            key,
            version_range,
            license_id,
        } => writer.render(&add(&store, scope, &key, &version_range, &license_id)?),
        DepsAction::Delete { index } => writer.render(&delete(&store, scope, index)?),
    }
}

/// List the dependencies of a document with their positions.
pub fn list(store: &AllowListStore<'_>, scope: AllowListScope) -> Result<DependencyList, CliError> {
    let document = store.dependencies(scope)?;
    let dependencies = document
        .iter()
        .enumerate()
        .map(|(index, dependency)| IndexedDependency {
            index,
            dependency: dependency.clone(),
        })
        .collect();
    Ok(DependencyList {
        document: scope.key(),
        dependencies,
    })
}

pub fn add(
    store: &AllowListStore<'_>,
    scope: AllowListScope,
    key: &str,
    version_range: &str,
    license_id: &str,
) -> Result<DependencyChange, CliError> {
    let index = store.add_dependency(scope, key, version_range, license_id)?;
    Ok(DependencyChange {
        action: "added",
        index,
        dependency: AllowedDependency::new(key.trim(), version_range.trim(), license_id.trim()),
    })
}

pub fn delete(
    store: &AllowListStore<'_>,
    scope: AllowListScope,
    index: usize,
) -> Result<DependencyChange, CliError> {
    let dependency = store.delete_dependency(scope, index)?;
    Ok(DependencyChange {
        action: "deleted",
        index,
        dependency,
    })
}

#[derive(Serialize)]
pub struct IndexedDependency {
    pub index: usize,
    #[serde(flatten)]
    pub dependency: AllowedDependency,
}

/// Allowed dependency list output.
#[derive(Serialize)]
pub struct DependencyList {
    pub document: &'static str,
    pub dependencies: Vec<IndexedDependency>,
}

impl Render for DependencyList {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.dependencies.is_empty() {
            return writeln!(w, "No allowed dependencies in {}.", self.document);
        }
        let rows: Vec<Vec<String>> = self
            .dependencies
            .iter()
            .map(|d| {
                vec![
                    d.index.to_string(),
                    d.dependency.key.clone(),
                    d.dependency.version_range.clone(),
                    d.dependency.license_id.clone(),
                ]
            })
            .collect();
        write_table(w, &["#", "Key", "Version", "License"], &rows)
    }
}

/// Result of adding or deleting a dependency.
#[derive(Serialize)]
pub struct DependencyChange {
    pub action: &'static str,
    pub index: usize,
    pub dependency: AllowedDependency,
}

impl Render for DependencyChange {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;
        writeln!(
            w,
            "{} dependency #{} {} {} ({})",
            "✓".green(),
            self.index,
            self.action,
            self.dependency.key,
            self.dependency.license_id
        )
    }
}
