//! Command handlers -- one module per subcommand

pub mod config;
pub mod deps;
pub mod export;
pub mod licenses;
pub mod report;
pub mod scope;

use tracing::debug;

use depcheck_core::config::DepcheckConfig;
use depcheck_core::store::{
    AnalysisFixture, FileSettingsStore, MemoryDependencyGraph, MemoryMeasureStore,
};

use crate::error::CliError;

/// Open the settings store configured in `[store]`.
///
/// The file does not need to exist yet; it is created on the first write.
pub fn open_settings(config: &DepcheckConfig) -> FileSettingsStore {
    debug!(path = %config.store.settings_path, "opening settings store");
    FileSettingsStore::new(&config.store.settings_path)
}

/// Load the analysis file configured in `[store]` into a graph and measure store.
pub fn load_analysis(
    config: &DepcheckConfig,
) -> Result<(MemoryDependencyGraph, MemoryMeasureStore), CliError> {
    debug!(path = %config.store.analysis_path, "loading analysis file");
    let fixture = AnalysisFixture::load(&config.store.analysis_path)?;
    Ok(fixture.into_stores())
}
