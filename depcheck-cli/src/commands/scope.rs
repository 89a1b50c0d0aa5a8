//! `depcheck scope` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use depcheck_core::config::DepcheckConfig;
use depcheck_core::store::SettingsStore;
use depcheck_core::types::Usage;
use depcheck_report::{ScopeSet, load_scopes, save_scopes};

use crate::cli::{ScopeAction, ScopeArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `scope` command.
pub fn execute(
    args: ScopeArgs,
    config: &DepcheckConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let settings = super::open_settings(config);
    let scopes = match args.action {
        ScopeAction::Show => load_scopes(&settings)?,
        ScopeAction::Set {
            compile,
            provided,
            runtime,
            test,
        } => set(
            &settings,
            ScopeSet {
                compile,
                provided,
                runtime,
                test,
            },
        )?,
    };
    writer.render(&ScopeReport::from(scopes))
}

/// Persist the scope flags and return what the store now holds.
pub fn set(settings: &dyn SettingsStore, scopes: ScopeSet) -> Result<ScopeSet, CliError> {
    save_scopes(settings, &scopes)?;
    info!(enabled = ?scopes.usages(), "dependency scopes updated");
    Ok(load_scopes(settings)?)
}

/// Enabled scope output.
#[derive(Serialize)]
pub struct ScopeReport {
    #[serde(flatten)]
    pub scopes: ScopeSet,
}

impl From<ScopeSet> for ScopeReport {
    fn from(scopes: ScopeSet) -> Self {
        Self { scopes }
    }
}

impl Render for ScopeReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;
        for usage in Usage::ALL {
            let state = if self.scopes.contains(usage) {
                "enabled".green()
            } else {
                "disabled".dimmed()
            };
            writeln!(w, "{:<10} {}", usage.as_str(), state)?;
        }
        if self.scopes.is_empty() {
            writeln!(w)?;
            writeln!(
                w,
                "{}",
                "No scope is enabled; reports will be empty.".yellow()
            )?;
        }
        Ok(())
    }
}
