//! Collaborators the sampling loop talks to.
//!
//! - **SensorReader**: produces one [`Reading`] per request (DHT, mock)
//! - **ReportSink**: carries text lines off the device (UART, mock)
//! - **Clock**: monotonic time and the tick sleep (embassy-time, fake)

use core::future::Future;

use embassy_time::Instant;

use crate::measurement::Reading;

/// Port for the temperature / humidity sensor.
///
/// There is no error channel: whatever goes wrong on the wire (no sensor,
/// bad checksum, timeout) shows up as absent fields in the reading.
///
/// # Example Implementation
///
/// ```ignore
/// impl SensorReader for Dht11Reader {
///     async fn read(&mut self) -> Reading {
///         match dht11::Reading::read(&mut self.delay, &mut self.pin) {
///             Ok(r) => Reading::new(Some(r.temperature as f32), Some(r.relative_humidity as f32)),
///             Err(_) => Reading::absent(),
///         }
///     }
/// }
/// ```
pub trait SensorReader {
    fn read(&mut self) -> impl Future<Output = Reading>;
}

/// Port for the report channel.
pub trait ReportSink {
    /// Writes `line` followed by the channel's line terminator.
    ///
    /// Fire-and-forget: transport errors are the adapter's business.
    fn write_line(&mut self, line: &str);
}

/// Port for monotonic time.
pub trait Clock {
    fn now(&self) -> Instant;

    /// Returns once `deadline` has passed, immediately if it already has.
    fn sleep_until(&mut self, deadline: Instant) -> impl Future<Output = ()>;
}
