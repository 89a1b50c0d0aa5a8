//! `depcheck licenses` command handler

use std::io::Write;
use std::str::FromStr;

use serde::Serialize;

use depcheck_allowlist::{AllowListStore, License, SourceType};
use depcheck_core::config::DepcheckConfig;

use crate::cli::{LicensesAction, LicensesArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render, write_table};

/// Execute the `licenses` command.
pub fn execute(
    args: LicensesArgs,
    config: &DepcheckConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let settings = super::open_settings(config);
    let store =
        AllowListStore::new(&settings).with_legacy_project(config.report.legacy_project_allowlist);

    match args.action {
        LicensesAction::List => writer.render(&list(&store)?),
        LicensesAction::Add {
            id,
            title,
            description,
            url,
            source_type,
            commercial,
        } => {
            let source_type = match source_type {
                Some(value) => SourceType::from_str(&value)?,
                None => SourceType::default(),
            };
            let license = License {
                id,
                title,
                description,
                url,
                source_type,
                commercial,
            };
            writer.render(&add(&store, license)?)
        }
        LicensesAction::Delete { id } => writer.render(&delete(&store, &id)?),
    }
}

pub fn list(store: &AllowListStore<'_>) -> Result<LicenseList, CliError> {
    let document = store.licenses()?;
    Ok(LicenseList {
        licenses: document.iter().cloned().collect(),
        source_types: SourceType::all(),
    })
}

pub fn add(store: &AllowListStore<'_>, license: License) -> Result<LicenseChange, CliError> {
    store.add_license(license.clone())?;
    Ok(LicenseChange {
        action: "added",
        id: license.id.trim().to_owned(),
        title: license.title.trim().to_owned(),
    })
}

pub fn delete(store: &AllowListStore<'_>, id: &str) -> Result<LicenseChange, CliError> {
    let removed = store.delete_license(id)?;
    Ok(LicenseChange {
        action: "deleted",
        id: removed.id,
        title: removed.title,
    })
}

/// Allowed license list output.
#[derive(Serialize)]
pub struct LicenseList {
    pub licenses: Vec<License>,
    #[serde(skip)]
    pub source_types: Vec<&'static str>,
}

impl Render for LicenseList {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.licenses.is_empty() {
            writeln!(w, "No allowed licenses.")?;
        } else {
            let rows: Vec<Vec<String>> = self
                .licenses
                .iter()
                .map(|l| {
                    vec![
                        l.id.clone(),
                        l.title.clone(),
                        l.source_type.to_string(),
                        if l.commercial { "yes" } else { "no" }.to_owned(),
                        l.url.clone(),
                    ]
                })
                .collect();
            write_table(w, &["ID", "Title", "Source Type", "Commercial", "URL"], &rows)?;
        }
        writeln!(w)?;
        writeln!(w, "Source types: {}", self.source_types.join(", "))
    }
}

/// Result of adding or deleting a license.
#[derive(Serialize)]
pub struct LicenseChange {
    pub action: &'static str,
    pub id: String,
    pub title: String,
}

impl Render for LicenseChange {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;
        writeln!(
            w,
            "{} license {} {} ({})",
            "✓".green(),
            self.id,
            self.action,
            self.title
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depcheck_allowlist::AllowListScope;
    use depcheck_core::store::MemorySettingsStore;

    fn license(id: &str) -> License {
        License {
            id: id.to_owned(),
            title: format!("{id} License"),
            description: "<b>text</b> ]]> tricky".to_owned(),
            url: String::new(),
            source_type: SourceType::OpensourceNoCopyleft,
            commercial: false,
        }
    }

    #[test]
    fn test_add_then_list() {
        let settings = MemorySettingsStore::new();
        let store = AllowListStore::new(&settings);
        let change = add(&store, license(" MIT ")).expect("add should succeed");
        assert_eq!(change.id, "MIT");

        let listed = list(&store).expect("list should succeed");
        assert_eq!(listed.licenses.len(), 1);
        assert_eq!(listed.licenses[0].description, "<b>text</b> ]]> tricky");
        assert_eq!(listed.source_types.len(), 3);
    }

    #[test]
    fn test_duplicate_license_rejected() {
        let settings = MemorySettingsStore::new();
        let store = AllowListStore::new(&settings);
        add(&store, license("MIT")).expect("first add should succeed");
        let err = add(&store, license("MIT"))
            .err()
            .expect("duplicate should fail");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_delete_referenced_license_rejected() {
        let settings = MemorySettingsStore::new();
        let store = AllowListStore::new(&settings);
        add(&store, license("MIT")).expect("add should succeed");
        store
            .add_dependency(AllowListScope::Global, "org.slf4j:slf4j-api", "1.7.36", "MIT")
            .expect("dependency add should succeed");

        let err = delete(&store, "MIT").err().expect("delete should fail");
        assert_eq!(err.exit_code(), 3);
        assert_eq!(list(&store).expect("list").licenses.len(), 1);
    }

    #[test]
    fn test_delete_unknown_license() {
        let settings = MemorySettingsStore::new();
        let store = AllowListStore::new(&settings);
        let err = delete(&store, "GPL-3.0").err().expect("delete should fail");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_delete_unreferenced_license() {
        let settings = MemorySettingsStore::new();
        let store = AllowListStore::new(&settings);
        add(&store, license("MIT")).expect("add should succeed");
        let change = delete(&store, "MIT").expect("delete should succeed");
        assert_eq!(change.title, "MIT License");
        assert!(list(&store).expect("list").licenses.is_empty());
    }

    #[test]
    fn test_invalid_source_type_is_validation_error() {
        let err: CliError = SourceType::from_str("PROPRIETARY")
            .err()
            .expect("unknown source type")
            .into();
        assert_eq!(err.exit_code(), 3);
    }
}
