use dht_sensor::{dht11, dht22, DhtReading};
use embassy_time::Instant;
use embedded_hal::digital::v2::OutputPin;
use esp32c3_hal::{
    gpio::{GpioPin, OpenDrain, Output},
    Delay,
};
use log::debug;
use sampler::config::{SensorModel, SENSOR_PIN};
use sampler::{Reading, SensorReader};

/// The data line. Only typechecks against the pin `main` hands over when
/// that pin is the configured one.
pub type DhtPin = GpioPin<Output<OpenDrain>, { SENSOR_PIN }>;

/// Single-wire DHT11 / DHT22 driver.
///
/// The parts cannot be polled faster than their minimum sampling period;
/// a request arriving earlier gets the previous result again.
pub struct DhtReader {
    pin: DhtPin,
    delay: Delay,
    model: SensorModel,
    last: Option<(Instant, Reading)>,
}

impl DhtReader {
    pub fn new(mut pin: DhtPin, delay: Delay, model: SensorModel) -> Self {
        // the line idles high between transactions
        OutputPin::set_high(&mut pin).ok();

        Self {
            pin,
            delay,
            model,
            last: None,
        }
    }

    fn sample(&mut self) -> Reading {
        let reading = match self.model {
            SensorModel::Dht11 => {
                dht11::Reading::read(&mut self.delay, &mut self.pin).map(|r| {
                    Reading::new(
                        Some(f32::from(r.temperature)),
                        Some(f32::from(r.relative_humidity)),
                    )
                })
            }
            SensorModel::Dht22 => dht22::Reading::read(&mut self.delay, &mut self.pin)
                .map(|r| Reading::new(Some(r.temperature), Some(r.relative_humidity))),
        };

        reading.unwrap_or_else(|e| {
            debug!("{} transaction failed: {:?}", self.model, e);
            Reading::absent()
        })
    }
}

impl SensorReader for DhtReader {
    async fn read(&mut self) -> Reading {
        let now = Instant::now();
        if let Some((at, reading)) = self.last {
            if now - at < self.model.min_sample_period() {
                return reading;
            }
        }

        let reading = self.sample();
        self.last = Some((now, reading));
        reading
    }
}
