//! CLI argument parsing with clap.

use clap::{Args, Parser};
use std::path::PathBuf;

use crate::config::Config;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "ouilookup")]
#[command(author, version, about = "Look up IEEE OUI assignments by MAC, prefix, organization or country")]
pub struct Cli {
    #[command(flatten)]
    pub search: Search,

    /// OUI file which will be downloaded and read
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,

    /// Force update of the OUI database
    #[arg(short, long)]
    pub update: bool,

    /// Custom OUI source URL
    #[arg(long)]
    pub url: Option<String>,

    /// Maximum age of the local OUI file in seconds (0 disables the check)
    #[arg(long, allow_negative_numbers = true)]
    pub max_age: Option<i64>,

    /// HTTP connect timeout in seconds (a download may take ten times this)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Log)]
    pub format: OutputFormat,

    /// Config file path (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Exactly one search criterion.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct Search {
    /// Search by MAC prefix (e.g. 00:22:72)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Search by full MAC address
    #[arg(short, long)]
    pub mac: Option<String>,

    /// Search by organization name (case-insensitive substring)
    #[arg(long = "organization", visible_alias = "org")]
    pub organization: Option<String>,

    /// Search by two-letter country code
    #[arg(long = "country-code", visible_alias = "cc")]
    pub country_code: Option<String>,

    /// Search by country name
    #[arg(long = "country-name", visible_alias = "cn")]
    pub country_name: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of a base configuration.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(ref outfile) = self.outfile {
            config.outfile = outfile.clone();
        }
        if let Some(ref url) = self.url {
            config.url = url.clone();
        }
        if let Some(max_age) = self.max_age {
            config.max_age = max_age;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.update {
            config.force_update = true;
        }
        config
    }
}
