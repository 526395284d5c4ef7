use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use sampler::config::BAUD_RATE;

use crate::csv::TIMESTAMP_FORMAT;

const DEFAULT_LOG_FILE: &str = "data/data.csv";

#[derive(Debug, Parser)]
#[command(about = "Collects report lines from a DHT sampler and summarises them")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the serial ports on this machine
    Ports,
    /// Append every reported measurement to a CSV file
    Log(LogArgs),
    /// Print statistics over a CSV file written by `log`
    Summary(SummaryArgs),
}

#[derive(Debug, clap::Args)]
pub struct LogArgs {
    #[arg(long, env = "RECEIVER_PORT")]
    pub port: String,

    #[arg(long, env = "RECEIVER_BAUD", default_value_t = BAUD_RATE)]
    pub baud: u32,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub output: PathBuf,
}

#[derive(Debug, clap::Args)]
pub struct SummaryArgs {
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub file: PathBuf,

    /// Inclusive lower bound, `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`
    #[arg(long, value_parser = parse_timestamp)]
    pub from: Option<NaiveDateTime>,

    /// Inclusive upper bound, `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`
    #[arg(long, value_parser = parse_timestamp)]
    pub to: Option<NaiveDateTime>,
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    if let Ok(t) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
        return Ok(t);
    }
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(d) => Ok(d.and_time(Default::default())),
        Err(_) => bail!("expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS, got {s:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_dates_and_timestamps() {
        let t = parse_timestamp("2025-03-01 12:30:05").unwrap();
        assert_eq!(t.to_string(), "2025-03-01 12:30:05");

        let d = parse_timestamp("2025-03-01").unwrap();
        assert_eq!(d.to_string(), "2025-03-01 00:00:00");

        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn log_defaults() {
        let args = Args::parse_from(["receiver", "log", "--port", "/dev/ttyUSB0"]);
        let Command::Log(log) = args.command else {
            panic!("expected log command");
        };
        assert_eq!(log.baud, 9600);
        assert_eq!(log.output, PathBuf::from("data/data.csv"));
    }
}
