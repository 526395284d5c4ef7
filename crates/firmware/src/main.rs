//! Sample a DHT sensor and report every reading over UART0
//!
//! The following wiring is assumed:
//! - DHT data => GPIO2 (10k pull-up to 3V3)
//! - UART0 TX => GPIO21, RX => GPIO20
//!
//! Logs go to the USB-Serial-JTAG console so the UART carries nothing but
//! report lines.

#![no_std]
#![no_main]
#![feature(type_alias_impl_trait)]
#![deny(clippy::unwrap_used)]

mod clock;
mod sensor;
mod serial;

use embassy_executor::Spawner;

use esp32c3_hal::{
    clock::{ClockControl, Clocks},
    embassy,
    gpio::IO,
    peripherals::Peripherals,
    prelude::*,
    timer::TimerGroup,
    uart::{config::Config, TxRxPins, Uart},
    Delay,
};
use esp_backtrace as _;

use log::{error, info};
use sampler::config::{BAUD_RATE, SENSOR_MODEL, SENSOR_PIN};
use sampler::SamplingLoop;

use static_cell::StaticCell;

use clock::EmbassyClock;
use sensor::DhtReader;
use serial::UartSink;

static CLOCK: StaticCell<Clocks> = StaticCell::new();

type Sampler = SamplingLoop<DhtReader, UartSink, EmbassyClock>;

#[main]
async fn main(spawner: Spawner) {
    esp_println::logger::init_logger(log::LevelFilter::Info);

    let peripherals = Peripherals::take();
    let system = peripherals.SYSTEM.split();
    let clocks = ClockControl::max(system.clock_control).freeze();
    let clocks = CLOCK.init(clocks);
    let io = IO::new(peripherals.GPIO, peripherals.IO_MUX);

    let timg0 = TimerGroup::new(peripherals.TIMG0, clocks);
    embassy::init(clocks, timg0.timer0);

    let sink = {
        let pins = TxRxPins::new_tx_rx(
            io.pins.gpio21.into_push_pull_output(),
            io.pins.gpio20.into_floating_input(),
        );
        let config = Config::default().baudrate(BAUD_RATE);
        UartSink::new(Uart::new_with_config(
            peripherals.UART0,
            config,
            Some(pins),
            clocks,
        ))
    };

    let sensor = DhtReader::new(
        io.pins.gpio2.into_open_drain_output(),
        Delay::new(clocks),
        SENSOR_MODEL,
    );

    info!(
        "{} on GPIO{}, reporting at {} baud",
        SENSOR_MODEL, SENSOR_PIN, BAUD_RATE
    );

    let sampler = SamplingLoop::new(sensor, sink, EmbassyClock);
    if let Err(e) = spawner.spawn(sampling(sampler)) {
        error!("failed to start sampling: {:?}", e);
    }
}

#[embassy_executor::task]
async fn sampling(mut sampler: Sampler) {
    sampler.run().await
}
