//! depcheck -- dependency license report and allow-list administration CLI.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use depcheck_core::config::DepcheckConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let loaded = DepcheckConfig::load_or_default(&cli.config).map_err(CliError::from);

    let general = match &loaded {
        Ok(config) => config.general.clone(),
        Err(_) => Default::default(),
    };
    logging::init_tracing(&general, cli.log_level.as_deref())
        .map_err(|e| CliError::Config(format!("{e:#}")))?;
    depcheck_core::metrics::describe_all();

    tracing::debug!(config = %cli.config.display(), "depcheck starting");

    let writer = OutputWriter::new(cli.output);
    match cli.command {
        Commands::Config(args) => commands::config::execute(args, &cli.config, loaded, &writer),
        Commands::Report(args) => commands::report::execute(args, &loaded?, &writer),
        Commands::Export(args) => commands::export::execute(args, &loaded?, &writer),
        Commands::Deps(args) => commands::deps::execute(args, &loaded?, &writer),
        Commands::Licenses(args) => commands::licenses::execute(args, &loaded?, &writer),
        Commands::Scope(args) => commands::scope::execute(args, &loaded?, &writer),
    }
}
