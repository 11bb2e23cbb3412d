//! Microsecond delays on the basic timer (TIM6).

use crate::config;
use crate::device::{rcc, tim6};
use crate::panic::OptionalExt;
use crate::regs::{Bus, Word};
use crate::wait::{self, Forever};
use embedded_hal::blocking::delay::{DelayMs, DelayUs};

/// Free-running 16-bit counter ticking once per microsecond.
pub struct Timer<'a, B: Bus> {
    bus: &'a B,
}

impl<'a, B: Bus> Timer<'a, B> {
    /// Enable and start the timer.
    ///
    /// The prescaler is derived from the APB1 timer clock, so the clock tree must already be
    /// configured. Blocks until the first update event, after which PSC/ARR are in effect.
    pub fn configure(bus: &'a B) -> Self {
        bus.modify(rcc::APB1ENR, |w| w.set(rcc::apb1enr::TIM6EN));

        bus.write(tim6::PSC, Word::RESET.with(tim6::psc::PSC, config::tim::PSC));
        bus.write(tim6::ARR, Word::RESET.with(tim6::arr::ARR, config::tim::ARR));

        bus.modify(tim6::CR1, |w| w.set(tim6::cr1::CEN));
        wait::until(&mut Forever, || bus.read(tim6::SR).is_set(tim6::sr::UIF)).unwrap_infallible();

        Self { bus }
    }

    /// Busy-wait for `us` microseconds (1us resolution).
    ///
    /// Restarts the counter from zero, so consecutive calls are consecutive waits.
    pub fn delay_us(&mut self, us: u16) {
        let bus = self.bus;
        bus.write(tim6::CNT, Word::RESET);
        wait::until(&mut Forever, || {
            bus.read(tim6::CNT).get(tim6::cnt::CNT) >= u32::from(us)
        })
        .unwrap_infallible();
    }

    /// Busy-wait for approximately `ms` milliseconds.
    ///
    /// This is `ms` back-to-back 1000us delays, so loop overhead accumulates on top of the
    /// requested time.
    pub fn delay_ms(&mut self, ms: u16) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}

impl<B: Bus> DelayUs<u16> for Timer<'_, B> {
    fn delay_us(&mut self, us: u16) {
        Timer::delay_us(self, us)
    }
}

impl<B: Bus> DelayMs<u16> for Timer<'_, B> {
    fn delay_ms(&mut self, ms: u16) {
        Timer::delay_ms(self, ms)
    }
}
