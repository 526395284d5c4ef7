use std::io::{BufRead, ErrorKind, Write};

use anyhow::{Context as _, Result};
use chrono::NaiveDateTime;
use sampler::Report;
use tracing::{debug, info, warn};

use crate::csv::{Record, RecordWriter};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub measurements: u64,
    pub failures: u64,
    pub ignored: u64,
}

/// Turns the device's report lines into CSV rows.
pub struct Monitor<W: Write> {
    writer: RecordWriter<W>,
    counts: Counts,
}

impl<W: Write> Monitor<W> {
    pub fn new(writer: RecordWriter<W>) -> Self {
        Self {
            writer,
            counts: Counts::default(),
        }
    }

    pub fn handle_line(&mut self, line: &str, now: NaiveDateTime) -> Result<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        match line.parse::<Report>() {
            Ok(Report::Measurement(m)) => {
                info!(
                    temperature_c = m.temperature_c,
                    humidity_pct = m.humidity_pct,
                    "measurement"
                );
                self.writer.append(&Record {
                    timestamp: now,
                    temperature_c: m.temperature_c,
                    humidity_pct: m.humidity_pct,
                })?;
                self.counts.measurements += 1;
            }
            Ok(Report::Failed) => {
                warn!("device failed to read its sensor");
                self.counts.failures += 1;
            }
            Err(e) => {
                debug!(%e, line, "ignoring line");
                self.counts.ignored += 1;
            }
        }
        Ok(())
    }

    /// Reads lines until end of input. Read timeouts are expected on a quiet
    /// serial port and are waited out without losing a partial line.
    pub fn run<R: BufRead>(
        &mut self,
        mut reader: R,
        mut now: impl FnMut() -> NaiveDateTime,
    ) -> Result<Counts> {
        let mut buf = Vec::new();
        loop {
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    self.handle_line(&String::from_utf8_lossy(&buf), now())?;
                    buf.clear();
                }
                Err(e) if e.kind() == ErrorKind::TimedOut => continue,
                Err(e) => return Err(e).context("failed to read from device"),
            }
        }

        if !buf.is_empty() {
            self.handle_line(&String::from_utf8_lossy(&buf), now())?;
        }
        Ok(self.counts)
    }
}
