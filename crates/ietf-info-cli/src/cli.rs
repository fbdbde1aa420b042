//! Command-line configuration.

use std::num::NonZeroUsize;
use std::time::Duration;

use clap::Parser;
use ietf_info_classify::RunOptions;
use ietf_info_core::criteria::{
    DEFAULT_FIRST_NUMBER, DEFAULT_FIRST_YEAR, DEFAULT_LAST_NUMBER, DEFAULT_STATUSES, current_year,
};
use ietf_info_core::{CoreError, FilterCriteria};
use ietf_info_fetch::{DATATRACKER_URL, Endpoints, RFC_EDITOR_URL};
use ietf_info_index::IndexOptions;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "ietf-info")]
#[command(version)]
#[command(about = "Count RFC contributions by name")]
#[command(after_help = r#"Example: ietf-info -n "Firstname Lastname" -v"#)]
pub struct Cli {
    /// Name to search for, e.g. "Firstname Lastname"
    #[arg(short, long, env = "IETF_INFO_NAME", value_parser = parse_name)]
    pub name: String,

    /// Extra statuses to include, comma-separated (added to the defaults)
    #[arg(short, long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// First publication year to consider
    #[arg(long, default_value_t = DEFAULT_FIRST_YEAR)]
    pub first_year: i32,

    /// Last publication year to consider [default: current year]
    #[arg(long)]
    pub last_year: Option<i32>,

    /// Lowest RFC number to consider
    #[arg(long, default_value_t = DEFAULT_FIRST_NUMBER)]
    pub first_rfc: u32,

    /// Highest RFC number to consider
    #[arg(long, default_value_t = DEFAULT_LAST_NUMBER)]
    pub last_rfc: u32,

    /// List the RFC numbers in every category
    #[arg(short, long)]
    pub verbose: bool,

    /// Print debug info
    #[arg(short, long)]
    pub debug: bool,

    /// Maximum number of RFCs looked up at once [default: all]
    #[arg(long)]
    pub max_in_flight: Option<NonZeroUsize>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Top-level tables between the first one and the RFC table on the index page
    #[arg(long, default_value_t = IndexOptions::default().skip_tables)]
    pub skip_tables: usize,

    #[arg(long, env = "IETF_INFO_RFC_EDITOR_URL", default_value = RFC_EDITOR_URL)]
    pub rfc_editor_url: String,

    #[arg(long, env = "IETF_INFO_DATATRACKER_URL", default_value = DATATRACKER_URL)]
    pub datatracker_url: String,
}

fn parse_name(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("name must not be empty".into());
    }
    Ok(s.to_string())
}

impl Cli {
    pub fn criteria(&self) -> Result<FilterCriteria, CoreError> {
        let statuses = DEFAULT_STATUSES
            .iter()
            .map(|s| s.to_string())
            .chain(self.include.iter().cloned());
        FilterCriteria::new(
            self.name.clone(),
            statuses,
            self.first_year..=self.last_year.unwrap_or_else(current_year),
            self.first_rfc..=self.last_rfc,
        )
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.rfc_editor_url, &self.datatracker_url)
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            index: IndexOptions {
                skip_tables: self.skip_tables,
            },
            max_in_flight: self.max_in_flight,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn log_level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else if self.verbose {
            Level::INFO
        } else {
            Level::WARN
        }
    }
}
