use crate::constants::{APP_DESCRIPTION, APP_NAME, DATE_FORMAT_COMPACT, DATE_FORMAT_ISO};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

/// A date-keyed journal with autosave
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, version, long_about = None)]
pub struct CliArgs {
    /// Opens the entry for a specific date instead of today (format: YYYY-MM-DD or YYYYMMDD)
    #[arg(short = 'd', long)]
    pub date: Option<String>,

    /// Print verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Format of log lines written to stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl CliArgs {
    /// Get the date if specified, parsing it into a NaiveDate
    pub fn parse_date(&self) -> Option<Result<NaiveDate, chrono::ParseError>> {
        self.date.as_deref().map(parse_date)
    }
}

/// Parse a date string in YYYY-MM-DD or YYYYMMDD format
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    let date_str = date_str.trim();
    NaiveDate::parse_from_str(date_str, DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(date_str, DATE_FORMAT_COMPACT))
}
