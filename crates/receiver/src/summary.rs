use std::fmt;

use anyhow::{bail, Result};
use chrono::NaiveDateTime;

use crate::csv::{Record, TIMESTAMP_FORMAT};

/// Descriptive statistics of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation, undefined for a single value
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl Stats {
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (sq / (count - 1) as f64).sqrt()
        });

        Some(Self {
            count,
            mean,
            std,
            min: values[0],
            p25: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            p75: quantile(&values, 0.75),
            max: values[count - 1],
        })
    }
}

/// Linear interpolation between closest ranks, `sorted` must not be empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (pos - lower as f64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub first: NaiveDateTime,
    pub last: NaiveDateTime,
    pub temperature: Stats,
    pub humidity: Stats,
}

/// Summarises the records with `from <= timestamp <= to`.
pub fn summarize(
    records: impl IntoIterator<Item = Record>,
    from: Option<NaiveDateTime>,
    to: Option<NaiveDateTime>,
) -> Result<Summary> {
    let selected: Vec<Record> = records
        .into_iter()
        .filter(|r| from.is_none_or(|from| r.timestamp >= from))
        .filter(|r| to.is_none_or(|to| r.timestamp <= to))
        .collect();

    let (Some(first), Some(last)) = (
        selected.iter().map(|r| r.timestamp).min(),
        selected.iter().map(|r| r.timestamp).max(),
    ) else {
        bail!("no data found in the selected range");
    };

    let column = |f: fn(&Record) -> f32| selected.iter().map(|r| f64::from(f(r))).collect();
    match (
        Stats::from_values(column(|r| r.temperature_c)),
        Stats::from_values(column(|r| r.humidity_pct)),
    ) {
        (Some(temperature), Some(humidity)) => Ok(Summary {
            first,
            last,
            temperature,
            humidity,
        }),
        _ => bail!("no data found in the selected range"),
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} readings from {} to {}",
            self.temperature.count,
            self.first.format(TIMESTAMP_FORMAT),
            self.last.format(TIMESTAMP_FORMAT)
        )?;
        writeln!(f, "{:<8} {:>16} {:>16}", "", "Temperature (°C)", "Humidity (%)")?;

        let t = &self.temperature;
        let h = &self.humidity;
        let rows = [
            ("mean", Some(t.mean), Some(h.mean)),
            ("std", t.std, h.std),
            ("min", Some(t.min), Some(h.min)),
            ("25%", Some(t.p25), Some(h.p25)),
            ("median", Some(t.median), Some(h.median)),
            ("75%", Some(t.p75), Some(h.p75)),
            ("max", Some(t.max), Some(h.max)),
        ];
        for (label, t, h) in rows {
            writeln!(f, "{label:<8} {:>16} {:>16}", Cell(t), Cell(h))?;
        }
        Ok(())
    }
}

struct Cell(Option<f64>);

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => f.pad(&format!("{v:.2}")),
            None => f.pad("-"),
        }
    }
}
