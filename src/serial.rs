//! Blocking serial transport on USART2 (PA2 = TX, PA3 = RX), 8N1.

use crate::config;
use crate::device::{gpioa, rcc, usart2};
use crate::num::Truncate;
use crate::panic::OptionalExt;
use crate::regs::{Bus, Word};
use crate::wait::{self, Deadline, Forever};
use core::convert::Infallible;
use core::fmt;

pub struct Serial<'a, B: Bus> {
    bus: &'a B,
}

impl<'a, B: Bus> Serial<'a, B> {
    /// Set up the pins and the USART, and enable both directions.
    ///
    /// The baud rate divisor is derived from PCLK1, so the clock tree must already be configured.
    pub fn configure(bus: &'a B) -> Self {
        // Step 1: clocks
        bus.modify(rcc::APB1ENR, |w| w.set(rcc::apb1enr::USART2EN));
        bus.modify(rcc::AHB1ENR, |w| w.set(rcc::ahb1enr::GPIOAEN));

        // Step 2: pins to alternate function 7 (USART2), high speed
        let (tx, rx) = (config::serial::TX_PIN, config::serial::RX_PIN);
        bus.modify(gpioa::MODER, |w| {
            w.with(gpioa::moder::pin(tx), gpioa::moder::ALTERNATE)
                .with(gpioa::moder::pin(rx), gpioa::moder::ALTERNATE)
        });
        bus.modify(gpioa::OSPEEDR, |w| {
            w.with(gpioa::ospeedr::pin(tx), gpioa::ospeedr::HIGH)
                .with(gpioa::ospeedr::pin(rx), gpioa::ospeedr::HIGH)
        });
        bus.modify(gpioa::AFRL, |w| {
            w.with(gpioa::afrl::pin(tx), gpioa::afrl::AF7)
                .with(gpioa::afrl::pin(rx), gpioa::afrl::AF7)
        });

        // Step 3: enable the USART from a clean state
        bus.write(usart2::CR1, Word::RESET);
        bus.modify(usart2::CR1, |w| w.set(usart2::cr1::UE));

        // Step 4: 8 data bits
        bus.modify(usart2::CR1, |w| w.clear(usart2::cr1::M));

        // Step 5: baud rate
        bus.write(
            usart2::BRR,
            Word::RESET
                .with(usart2::brr::DIV_MANTISSA, config::serial::BRR_MANTISSA)
                .with(usart2::brr::DIV_FRACTION, config::serial::BRR_FRACTION),
        );

        // Step 6: receiver and transmitter
        bus.modify(usart2::CR1, |w| w.set(usart2::cr1::RE));
        bus.modify(usart2::CR1, |w| w.set(usart2::cr1::TE));

        Self { bus }
    }

    /// Transmit one byte, blocking until it has left the shift register.
    pub fn send_byte(&mut self, byte: u8) {
        self.send_byte_within(byte, &mut Forever).unwrap_infallible()
    }

    pub fn send_byte_within<D: Deadline>(&mut self, byte: u8, deadline: &mut D) -> Result<(), D::Error> {
        let bus = self.bus;
        bus.write(usart2::DR, Word::RESET.with(usart2::dr::DR, byte.into()));
        wait::until(deadline, || bus.read(usart2::SR).is_set(usart2::sr::TC))
    }

    /// Transmit bytes from `buffer` until a zero byte or `max_length` bytes, whichever comes first.
    ///
    /// `_timeout_ms` is accepted for interface compatibility only: it does not bound anything,
    /// and each byte still blocks until transmission completes.
    ///
    /// Returns the number of bytes sent.
    pub fn send_string(&mut self, buffer: &[u8], max_length: usize, _timeout_ms: u32) -> usize {
        let mut sent = 0;
        for &byte in buffer.iter().take(max_length) {
            if byte == 0 {
                break;
            }
            self.send_byte(byte);
            sent += 1;
        }
        sent
    }

    /// Block until a byte has been received, and return it.
    pub fn receive_byte(&mut self) -> u8 {
        self.receive_byte_within(&mut Forever).unwrap_infallible()
    }

    pub fn receive_byte_within<D: Deadline>(&mut self, deadline: &mut D) -> Result<u8, D::Error> {
        let bus = self.bus;
        wait::until(deadline, || bus.read(usart2::SR).is_set(usart2::sr::RXNE))?;
        // reading DR clears RXNE
        Ok(bus.read(usart2::DR).get(usart2::dr::DR).truncate())
    }
}

impl<B: Bus> embedded_hal::serial::Write<u8> for Serial<'_, B> {
    type Error = Infallible;

    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        self.send_byte(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        if self.bus.read(usart2::SR).is_set(usart2::sr::TC) {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

impl<B: Bus> embedded_hal::blocking::serial::write::Default<u8> for Serial<'_, B> {}

impl<B: Bus> embedded_hal::serial::Read<u8> for Serial<'_, B> {
    type Error = Infallible;

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        if self.bus.read(usart2::SR).is_set(usart2::sr::RXNE) {
            Ok(self.bus.read(usart2::DR).get(usart2::dr::DR).truncate())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

impl<B: Bus> fmt::Write for Serial<'_, B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &byte in s.as_bytes() {
            self.send_byte(byte);
        }
        Ok(())
    }
}
