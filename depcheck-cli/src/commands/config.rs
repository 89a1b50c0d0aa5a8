//! `depcheck config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use depcheck_core::config::DepcheckConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
///
/// Receives the load result rather than a loaded config so that `validate`
/// can report a broken file instead of failing before it runs.
pub fn execute(
    args: ConfigArgs,
    config_path: &Path,
    loaded: Result<DepcheckConfig, CliError>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, loaded, writer),
        ConfigAction::Show { section } => {
            let report = build_show(config_path, &loaded?, section.as_deref())?;
            writer.render(&report)
        }
    }
}

/// Report whether the configuration loaded and validated.
///
/// A missing file is valid (defaults apply) and is reported as such.
fn execute_validate(
    config_path: &Path,
    loaded: Result<DepcheckConfig, CliError>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let report = build_validation(config_path, &loaded);
    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }
    Ok(())
}

pub fn build_validation(
    config_path: &Path,
    loaded: &Result<DepcheckConfig, CliError>,
) -> ConfigValidationReport {
    let source = config_path.display().to_string();
    match loaded {
        Ok(_) => ConfigValidationReport {
            source,
            file_exists: config_path.exists(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source,
            file_exists: config_path.exists(),
            valid: false,
            errors: vec![e.to_string()],
        },
    }
}

/// Serialize the effective configuration, optionally a single section.
pub fn build_show(
    config_path: &Path,
    config: &DepcheckConfig,
    section: Option<&str>,
) -> Result<ConfigReport, CliError> {
    let config_toml = match section {
        None => toml::to_string_pretty(config),
        Some("general") => toml::to_string_pretty(&config.general),
        Some("store") => toml::to_string_pretty(&config.store),
        Some("report") => toml::to_string_pretty(&config.report),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: general, store, report)",
                other
            )));
        }
    }
    .unwrap_or_else(|e| format!("(serialization error: {})", e));

    Ok(ConfigReport {
        source: config_path.display().to_string(),
        section: section.map(str::to_owned),
        config: config.clone(),
        config_toml,
    })
}

/// Configuration display report.
///
/// The `config_toml` field is only used for text rendering.
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Effective configuration
    pub config: DepcheckConfig,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        match &self.section {
            Some(section) => writeln!(w, "# {} [{}]", self.source, section)?,
            None => writeln!(w, "# {}", self.source)?,
        }
        write!(w, "{}", self.config_toml)
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub file_exists: bool,
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if self.valid {
            writeln!(w, "{} {}", "✓".green(), self.source)?;
            if !self.file_exists {
                writeln!(w, "  (file not found, built-in defaults apply)")?;
            }
        } else {
            writeln!(w, "{} {}", "✗".red(), self.source)?;
            for error in &self.errors {
                writeln!(w, "  - {}", error)?;
            }
        }
        Ok(())
    }
}
