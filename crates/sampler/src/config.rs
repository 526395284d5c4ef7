//! Build-time configuration. Nothing here can be changed at runtime.

use core::fmt;

use embassy_time::Duration;

/// Delay at the top of every cycle, measured tick to tick.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(50);

/// Rate of the serial line the reports are written to.
pub const BAUD_RATE: u32 = 9600;

/// GPIO the sensor's data line is wired to.
pub const SENSOR_PIN: u8 = 2;

/// Which part sits on [`SENSOR_PIN`].
pub const SENSOR_MODEL: SensorModel = SensorModel::Dht11;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SensorModel {
    Dht11,
    Dht22,
}

impl SensorModel {
    pub const fn name(&self) -> &'static str {
        match self {
            SensorModel::Dht11 => "DHT11",
            SensorModel::Dht22 => "DHT22",
        }
    }

    /// Shortest time between two bus transactions the part tolerates.
    pub const fn min_sample_period(&self) -> Duration {
        match self {
            SensorModel::Dht11 => Duration::from_secs(1),
            SensorModel::Dht22 => Duration::from_secs(2),
        }
    }
}

impl fmt::Display for SensorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
