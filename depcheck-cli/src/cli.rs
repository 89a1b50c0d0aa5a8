//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// depcheck -- dependency license report and allow-list administration.
///
/// Use `depcheck <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "depcheck", version, about, long_about = None)]
pub struct Cli {
    /// Path to the depcheck.toml configuration file (defaults apply when missing).
    #[arg(short, long, default_value = "depcheck.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the dependency license report of a project snapshot.
    Report(ReportArgs),

    /// Export the report of a project snapshot as header-less CSV.
    Export(ExportArgs),

    /// Manage the allowed dependency list.
    Deps(DepsArgs),

    /// Manage the allowed license list.
    Licenses(LicensesArgs),

    /// Show or change the enabled dependency scopes.
    Scope(ScopeArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- report ----

/// Reconcile the dependency graph with the scan result of a snapshot.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Project snapshot ID.
    pub snapshot_id: u64,

    /// Fail when the scan result contains malformed entries.
    #[arg(long)]
    pub strict: bool,
}

// ---- export ----

/// Export the report rows (without usage) as CSV.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Project snapshot ID.
    pub snapshot_id: u64,

    /// Display name used to derive the file name (default: snapshot name).
    #[arg(long)]
    pub name: Option<String>,

    /// Directory to write the CSV file into (default: print to stdout).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

// ---- deps ----

/// Manage the allowed dependency list.
#[derive(Args, Debug)]
pub struct DepsArgs {
    /// Use the deprecated project-scoped list instead of the global one.
    #[arg(long, global = true)]
    pub project: bool,

    #[command(subcommand)]
    pub action: DepsAction,
}

#[derive(Subcommand, Debug)]
pub enum DepsAction {
    /// List allowed dependencies with their index.
    List,
    /// Append an allowed dependency.
    Add {
        /// Artifact key (e.g. org.slf4j:slf4j-api).
        key: String,
        /// Allowed version range (e.g. [1.0,2.0)).
        version_range: String,
        /// ID of the license the dependency is allowed under.
        license_id: String,
    },
    /// Delete the dependency at a 0-based index (as shown by `deps list`).
    Delete {
        /// Position in the list.
        index: usize,
    },
}

// ---- licenses ----

/// Manage the allowed license list.
#[derive(Args, Debug)]
pub struct LicensesArgs {
    #[command(subcommand)]
    pub action: LicensesAction,
}

#[derive(Subcommand, Debug)]
pub enum LicensesAction {
    /// List allowed licenses.
    List,
    /// Add a license.
    Add {
        /// Unique license ID (e.g. Apache-2.0).
        id: String,
        /// License title.
        title: String,
        /// Free-form description, stored verbatim.
        #[arg(long, default_value = "")]
        description: String,
        /// URL of the license text.
        #[arg(long, default_value = "")]
        url: String,
        /// Source type (CLOSED, OPENSOURCE_COPYLEFT, OPENSOURCE_NO_COPYLEFT).
        #[arg(long)]
        source_type: Option<String>,
        /// Mark the license as commercial.
        #[arg(long)]
        commercial: bool,
    },
    /// Delete a license that no dependency references.
    Delete {
        /// License ID.
        id: String,
    },
}

// ---- scope ----

/// Show or change the enabled dependency scopes.
#[derive(Args, Debug)]
pub struct ScopeArgs {
    #[command(subcommand)]
    pub action: ScopeAction,
}

#[derive(Subcommand, Debug)]
pub enum ScopeAction {
    /// Show the enabled scopes.
    Show,
    /// Enable exactly the given scopes; unlisted scopes are disabled.
    Set {
        /// Include compile dependencies.
        #[arg(long)]
        compile: bool,
        /// Include provided dependencies.
        #[arg(long)]
        provided: bool,
        /// Include runtime dependencies.
        #[arg(long)]
        runtime: bool,
        /// Include test dependencies.
        #[arg(long)]
        test: bool,
    },
}

// ---- config ----

/// Manage depcheck configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, store, report).
        #[arg(long)]
        section: Option<String>,
    },
}
