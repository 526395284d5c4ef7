use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::NaiveDateTime;
use csv::{Reader, StringRecord, Writer, WriterBuilder};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const HEADER: [&str; 3] = ["Timestamp", "Temperature_C", "Humidity_Percent"];

const TIMESTAMP_INDEX: usize = 0;
const TEMPERATURE_INDEX: usize = 1;
const HUMIDITY_INDEX: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub timestamp: NaiveDateTime,
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

pub struct RecordWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, write_header: bool) -> Result<Self> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(inner);
        if write_header {
            writer
                .write_record(HEADER)
                .context("failed to write CSV header")?;
            writer.flush()?;
        }
        Ok(Self { writer })
    }

    /// Writes one row and flushes it, so an interrupted logger loses nothing.
    pub fn append(&mut self, record: &Record) -> Result<()> {
        self.writer
            .write_record([
                record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                record.temperature_c.to_string(),
                record.humidity_pct.to_string(),
            ])
            .context("failed to write CSV record")?;
        self.writer.flush().context("failed to flush CSV file")?;
        Ok(())
    }
}

/// Opens `path` for appending, creating it and its directory when missing.
/// The header goes in only when the file is empty.
pub fn open_log(path: &Path) -> Result<RecordWriter<File>> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory: {dir:?}"))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open file: {path:?}"))?;
    let is_empty = file.metadata()?.len() == 0;
    RecordWriter::new(file, is_empty)
}

pub fn read_records<R: Read>(reader: R) -> impl Iterator<Item = Result<Record>> {
    Reader::from_reader(reader).into_records().map(|row| {
        let row = row.context("failed to read CSV row")?;
        parse_row(&row)
    })
}

fn parse_row(row: &StringRecord) -> Result<Record> {
    let field = |index: usize| {
        row.get(index)
            .with_context(|| format!("missing column {index} in row {row:?}"))
    };

    let timestamp = field(TIMESTAMP_INDEX)?;
    let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .with_context(|| format!("failed to parse timestamp: {timestamp}"))?;

    let temperature = field(TEMPERATURE_INDEX)?;
    let temperature_c = temperature
        .parse()
        .with_context(|| format!("failed to parse temperature: {temperature}"))?;

    let humidity = field(HUMIDITY_INDEX)?;
    let humidity_pct = humidity
        .parse()
        .with_context(|| format!("failed to parse humidity: {humidity}"))?;

    Ok(Record {
        timestamp,
        temperature_c,
        humidity_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn writes_header_only_when_asked() {
        let record = Record {
            timestamp: at("2025-03-01 12:00:00"),
            temperature_c: 21.5,
            humidity_pct: 45.0,
        };

        let mut fresh = Vec::new();
        RecordWriter::new(&mut fresh, true)
            .unwrap()
            .append(&record)
            .unwrap();
        assert_eq!(
            String::from_utf8(fresh).unwrap(),
            "Timestamp,Temperature_C,Humidity_Percent\n2025-03-01 12:00:00,21.5,45\n"
        );

        let mut existing = Vec::new();
        RecordWriter::new(&mut existing, false)
            .unwrap()
            .append(&record)
            .unwrap();
        assert_eq!(
            String::from_utf8(existing).unwrap(),
            "2025-03-01 12:00:00,21.5,45\n"
        );
    }

    #[test]
    fn open_log_creates_directory_and_writes_header_once() {
        let root = std::env::temp_dir().join(format!("receiver-open-log-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        let path = root.join("nested").join("data.csv");
        let record = Record {
            timestamp: at("2025-03-01 12:00:00"),
            temperature_c: 21.5,
            humidity_pct: 45.0,
        };

        open_log(&path).unwrap().append(&record).unwrap();
        open_log(&path).unwrap().append(&record).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        fs::remove_dir_all(&root).unwrap();
        assert_eq!(
            written,
            "Timestamp,Temperature_C,Humidity_Percent\n\
             2025-03-01 12:00:00,21.5,45\n\
             2025-03-01 12:00:00,21.5,45\n"
        );
    }

    #[test]
    fn reads_what_the_logger_writes() {
        let data = "Timestamp,Temperature_C,Humidity_Percent\n\
                    2025-03-01 12:00:00,21.5,45\n\
                    2025-03-01 12:00:01,21.6,45.2\n";

        let records: Vec<Record> = read_records(data.as_bytes())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].timestamp, at("2025-03-01 12:00:01"));
        assert_eq!(records[1].temperature_c, 21.6);
        assert_eq!(records[1].humidity_pct, 45.2);
    }

    #[test]
    fn reports_bad_rows() {
        let data = "Timestamp,Temperature_C,Humidity_Percent\n\
                    2025-03-01 12:00:00,warm,45\n";

        let err = read_records(data.as_bytes()).next().unwrap().unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }
}
