//! Host side of the report channel.
//!
//! ```bash
//! receiver ports
//! receiver log --port /dev/ttyUSB0 --output data/data.csv
//! receiver summary --file data/data.csv --from 2025-03-01 --to 2025-03-02
//! ```

mod args;
mod csv;
mod monitor;
mod ports;
mod summary;

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use anyhow::{Context as _, Result};
use args::{Args, Command, LogArgs, SummaryArgs};
use chrono::Local;
use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use crate::csv::{open_log, read_records};
use crate::monitor::Monitor;

const READ_TIMEOUT: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match args.command {
        Command::Ports => ports::list(),
        Command::Log(args) => log(args),
        Command::Summary(args) => summary(args),
    }
}

fn log(args: LogArgs) -> Result<()> {
    let port = serialport::new(&args.port, args.baud)
        .timeout(READ_TIMEOUT)
        .flow_control(serialport::FlowControl::None)
        .open()
        .with_context(|| format!("failed to open serial port: {}", args.port))?;
    tracing::info!(port = %args.port, baud = args.baud, "connected");

    let writer = open_log(&args.output)?;
    tracing::info!(file = ?args.output, "logging measurements");

    let mut monitor = Monitor::new(writer);
    let counts = monitor.run(BufReader::new(port), || Local::now().naive_local())?;

    tracing::info!(
        measurements = counts.measurements,
        failures = counts.failures,
        ignored = counts.ignored,
        "device closed the port"
    );
    Ok(())
}

fn summary(args: SummaryArgs) -> Result<()> {
    let file =
        File::open(&args.file).with_context(|| format!("failed to open file: {:?}", args.file))?;
    let records = read_records(file).collect::<Result<Vec<_>>>()?;

    let summary = summary::summarize(records, args.from, args.to)?;
    print!("{summary}");
    Ok(())
}
