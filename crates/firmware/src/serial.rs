use core::fmt::Write;

use esp32c3_hal::{peripherals::UART0, uart::Uart};
use log::warn;
use sampler::ReportSink;

/// Report lines on UART0, CRLF terminated like a serial monitor expects.
pub struct UartSink {
    uart: Uart<'static, UART0>,
}

impl UartSink {
    pub fn new(uart: Uart<'static, UART0>) -> Self {
        Self { uart }
    }
}

impl ReportSink for UartSink {
    fn write_line(&mut self, line: &str) {
        if write!(self.uart, "{line}\r\n").is_err() {
            warn!("dropped report line");
        }
    }
}
