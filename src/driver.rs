//! Bring-up, then sample, report and wait, forever.

use crate::adc::{Adc, Enabled};
use crate::num::Truncate;
use crate::regs::Bus;
use crate::serial::Serial;
use crate::tim::Timer;
use crate::{ascii, config, rcc, report};

/// What one iteration sampled and sent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub raw: u16,
    pub volts: f32,
    /// Bytes transmitted
    pub sent: usize,
}

pub struct Driver<'a, B: Bus> {
    timer: Timer<'a, B>,
    serial: Serial<'a, B>,
    adc: Adc<'a, B, Enabled>,
}

impl<'a, B: Bus> Driver<'a, B> {
    /// Clocks, then timer, serial and ADC, in that order.
    pub fn init(bus: &'a B) -> Self {
        rcc::configure(bus);
        let timer = Timer::configure(bus);
        let serial = Serial::configure(bus);
        let adc = Adc::configure(bus).enable();

        Self::new(timer, serial, adc)
    }

    /// Assemble from peripherals that have already been brought up (see [`Driver::init`]).
    pub fn new(timer: Timer<'a, B>, serial: Serial<'a, B>, adc: Adc<'a, B, Enabled>) -> Self {
        Self { timer, serial, adc }
    }

    /// Sample the input, send the report line, then wait out the sample period.
    pub fn step(&mut self) -> Reading {
        self.adc.start(config::adc::CHANNEL);
        self.adc.wait_for_conversion();
        let raw = self.adc.read_value();

        let volts = report::voltage(raw);
        let codes = ascii::codes(raw.into());
        let line = report::render(&codes, volts);
        drop(codes);

        let sent = self.serial.send_string(
            line.as_bytes(),
            line.len(),
            config::serial::SEND_TIMEOUT_MS,
        );

        self.timer
            .delay_ms(config::driver::SAMPLE_PERIOD.to_millis().truncate());

        Reading { raw, volts, sent }
    }

    /// Call [`Driver::step`] forever, handing each reading to `on_reading`.
    pub fn run(&mut self, mut on_reading: impl FnMut(&Reading)) -> ! {
        loop {
            let reading = self.step();
            on_reading(&reading);
        }
    }
}
