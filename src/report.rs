//! The line sent over serial for each sample.

use crate::ascii;
use crate::config;
use core::fmt::Write;
use heapless::String;

pub type Line = String<{ config::driver::LINE_LEN }>;

/// Input voltage corresponding to a raw sample.
pub fn voltage(raw: u16) -> f32 {
    f32::from(raw) * (config::adc::VREF / config::adc::FULL_SCALE)
}

/// `ASCII Code: <codes>, Voltage: <volts> V\r\n`, with the voltage to 2 decimal places.
pub fn render(codes: &ascii::Codes, volts: f32) -> Line {
    let mut line = Line::new();
    if write!(line, "ASCII Code: {}, Voltage: {:.2} V\r\n", codes, volts).is_err() {
        panic!("report line overflow: {}", codes.as_str());
    }
    line
}

// worst case: 5 digit sample (u16::MAX), 52.80V
const _: () = assert!(
    "ASCII Code: ".len() + 5 * 3 - 1 + ", Voltage: ".len() + "52.80".len() + " V\r\n".len()
        <= config::driver::LINE_LEN
);
