//! ouilookup - IEEE OUI registry lookup
//!
//! Resolves MAC addresses and prefixes to the organizations they are
//! assigned to, and searches the registry by organization or country.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use ouilookup::cli::{Cli, Search};
use ouilookup::config::Config;
use ouilookup::output::OutputFormatter;
use ouilookup::{Loader, OuiEntry, OuiIndex};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let base = match cli.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    let config = cli.apply_to(base);
    config.validate()?;

    let index = match Loader::new(config.loader_config()).and_then(|loader| loader.index()) {
        Ok(index) => index,
        Err(e) => {
            error!("Failed to load OUI database: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let results = search(&index, &cli.search);
    if results.is_empty() {
        error!("Could not find any matching entry!");
        return Ok(ExitCode::FAILURE);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    OutputFormatter::new(cli.format).write(&results, &mut out)?;
    out.flush()?;

    Ok(ExitCode::SUCCESS)
}

/// Run the single query selected on the command line.
fn search<'a>(index: &'a OuiIndex, search: &Search) -> Vec<&'a OuiEntry> {
    if let Some(ref prefix) = search.prefix {
        index.by_prefix(prefix).collect()
    } else if let Some(ref mac) = search.mac {
        index.by_mac(mac).collect()
    } else if let Some(ref name) = search.organization {
        index.by_organization(name).collect()
    } else if let Some(ref code) = search.country_code {
        index.by_country_code(code).collect()
    } else if let Some(ref name) = search.country_name {
        index.by_country_name(name).collect()
    } else {
        Vec::new()
    }
}
