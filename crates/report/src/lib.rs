#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error type (`DependencyReportError`)
//! - [`scope`]: Enabled usage categories (`ScopeSet`, `load_scopes`, `save_scopes`)
//! - [`scan`]: Scan-result measure parser (`ScanResultMap`, `ScanEntry`, `MalformedEntry`)
//! - [`license_summary`]: License-summary measure parser (`LicenseSummaryEntry`)
//! - [`reconcile`]: Graph vs. scan reconciliation (`Reconciler`, `ReportRow`, `DependencyReport`)
//! - [`export`]: CSV and table rendering (`write_csv`, `csv_file_name`, `TableView`)

pub mod error;
pub mod export;
pub mod license_summary;
pub mod reconcile;
pub mod scan;
pub mod scope;

// --- Public API Re-exports ---

pub use error::DependencyReportError;
pub use export::{TableView, csv_file_name, to_csv_string, write_csv};
pub use license_summary::{LicenseSummaryEntry, parse_license_summary};
pub use reconcile::{DependencyReport, Reconciler, ReportRow, reconcile};
pub use scan::{MalformedEntry, ScanEntry, ScanResultMap};
pub use scope::{ScopeSet, load_scopes, save_scopes};
