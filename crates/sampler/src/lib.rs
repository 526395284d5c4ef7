//! Periodic temperature / humidity sampling.
//!
//! Every cycle the [`SamplingLoop`] waits for the next tick, asks a
//! [`SensorReader`] for one [`Reading`], validates it and writes exactly one
//! line to a [`ReportSink`]: either the formatted measurement or the failure
//! line. The hardware lives behind the traits in [`ports`], so the loop runs
//! the same on the device and in host tests.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod config;
pub mod measurement;
pub mod ports;
pub mod report;
pub mod sampling;

pub use config::SensorModel;
pub use measurement::{InvalidReading, Measurement, Reading};
pub use ports::{Clock, ReportSink, SensorReader};
pub use report::{ParseReportError, Report, FAILURE_LINE, LINE_CAPACITY};
pub use sampling::{SamplingLoop, State};
