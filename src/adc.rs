//! Single conversions on ADC1, polled.
//!
//! The converter moves through `Configured -> Enabled <-> Disabled`; conversions can only be
//! started while it is enabled.

use crate::config;
use crate::device::{adc1, adc_common, gpioa, rcc};
use crate::num::Truncate;
use crate::panic::OptionalExt;
use crate::regs::{Bus, Word};
use crate::wait::{self, Deadline, Forever};
use core::marker::PhantomData;
use embedded_hal::adc::{Channel, OneShot};

/// Configured, never powered on.
pub struct Configured;
/// Powered on and stabilized; conversions may be started.
pub struct Enabled;
/// Powered off after having been enabled.
pub struct Disabled;

mod sealed {
    pub trait PoweredOff {}
    impl PoweredOff for super::Configured {}
    impl PoweredOff for super::Disabled {}
}

/// Marker for ADC1, used by the `embedded_hal` channel traits.
pub struct Adc1;

/// PA1 in analog mode (ADC1 channel 1)
pub struct Pa1;
/// PA4 in analog mode (ADC1 channel 4)
pub struct Pa4;

impl Channel<Adc1> for Pa1 {
    type ID = u8;

    fn channel() -> u8 {
        1
    }
}

impl Channel<Adc1> for Pa4 {
    type ID = u8;

    fn channel() -> u8 {
        4
    }
}

pub struct Adc<'a, B: Bus, S> {
    bus: &'a B,
    _state: PhantomData<S>,
}

impl<'a, B: Bus, S> Adc<'a, B, S> {
    fn into_state<T>(self) -> Adc<'a, B, T> {
        Adc {
            bus: self.bus,
            _state: PhantomData,
        }
    }
}

impl<'a, B: Bus> Adc<'a, B, Configured> {
    /// Set up ADC1 for 12-bit right-aligned conversions, and put PA1 and PA4 in analog mode.
    ///
    /// The sequence length and channel 4 sample time are configured for a two-channel scan,
    /// but only single conversions of the channel passed to [`Adc::start`] are ever performed.
    pub fn configure(bus: &'a B) -> Self {
        // Step 1: clocks
        bus.modify(rcc::APB2ENR, |w| w.set(rcc::apb2enr::ADC1EN));
        bus.modify(rcc::AHB1ENR, |w| w.set(rcc::ahb1enr::GPIOAEN));

        // Step 2: ADCCLK = PCLK2 / 4
        bus.modify(adc_common::CCR, |w| {
            w.with(adc_common::ccr::ADCPRE, adc_common::ccr::adcpre_bits(config::adc::CLK_DIV))
        });

        // Step 3: scan mode, 12-bit
        bus.write(adc1::CR1, Word::RESET.set(adc1::cr1::SCAN));
        bus.modify(adc1::CR1, |w| w.with(adc1::cr1::RES, adc1::cr1::RES_12BIT));

        // Step 4: continuous, EOC after each conversion, right aligned
        bus.modify(adc1::CR2, |w| {
            w.set(adc1::cr2::CONT)
                .set(adc1::cr2::EOCS)
                .clear(adc1::cr2::ALIGN)
        });

        // Step 5: sample time
        bus.modify(adc1::SMPR2, |w| {
            config::adc::SCAN_CHANNELS.iter().fold(w, |w, &ch| {
                w.with(adc1::smpr2::smp(ch), adc1::smpr2::SMP_3_CYCLES)
            })
        });

        // Step 6: sequence length
        bus.modify(adc1::SQR1, |w| w.with(adc1::sqr1::L, config::adc::SEQUENCE_LEN - 1));

        // Step 7: pins
        bus.modify(gpioa::MODER, |w| {
            config::adc::SCAN_CHANNELS.iter().fold(w, |w, &ch| {
                w.with(gpioa::moder::pin(ch), gpioa::moder::ANALOG)
            })
        });

        Self {
            bus,
            _state: PhantomData,
        }
    }
}

impl<'a, B: Bus, S: sealed::PoweredOff> Adc<'a, B, S> {
    /// Power on, then spin for a fixed number of iterations to let the analog side settle.
    pub fn enable(self) -> Adc<'a, B, Enabled> {
        self.bus.modify(adc1::CR2, |w| w.set(adc1::cr2::ADON));

        for _ in 0..config::adc::STABILIZATION_LOOPS {
            core::hint::spin_loop();
        }

        self.into_state()
    }
}

impl<'a, B: Bus> Adc<'a, B, Enabled> {
    /// Start a single regular conversion of `channel`.
    ///
    /// Panics if `channel` is above [`adc1::sqr3::MAX_CHANNEL`].
    pub fn start(&mut self, channel: u8) {
        assert!(
            channel <= adc1::sqr3::MAX_CHANNEL,
            "ADC1 has no channel {}",
            channel
        );
        self.bus
            .write(adc1::SQR3, Word::RESET.with(adc1::sqr3::SQ1, channel.into()));
        self.bus.write(adc1::SR, Word::RESET);
        self.bus.modify(adc1::CR2, |w| w.set(adc1::cr2::SWSTART));
    }

    pub fn wait_for_conversion(&mut self) {
        self.wait_for_conversion_within(&mut Forever).unwrap_infallible()
    }

    pub fn wait_for_conversion_within<D: Deadline>(&mut self, deadline: &mut D) -> Result<(), D::Error> {
        let bus = self.bus;
        wait::until(deadline, || bus.read(adc1::SR).is_set(adc1::sr::EOC))
    }

    /// The latest conversion result.
    ///
    /// Call [`Adc::wait_for_conversion`] first: before the conversion completes, this returns
    /// the previous result (or whatever is in flight).
    pub fn read_value(&mut self) -> u16 {
        let data = self.bus.read(adc1::DR).get(adc1::dr::DATA);
        (data & u32::from(config::adc::MAX_POSSIBLE_SAMPLE)).truncate()
    }

    /// Start a conversion, wait for it, and return the result.
    pub fn convert(&mut self, channel: u8) -> u16 {
        self.start(channel);
        self.wait_for_conversion();
        self.read_value()
    }

    pub fn disable(self) -> Adc<'a, B, Disabled> {
        self.bus.modify(adc1::CR2, |w| w.clear(adc1::cr2::ADON));
        self.into_state()
    }
}

impl<B: Bus, Pin> OneShot<Adc1, u16, Pin> for Adc<'_, B, Enabled>
where
    Pin: Channel<Adc1, ID = u8>,
{
    type Error = core::convert::Infallible;

    fn read(&mut self, _pin: &mut Pin) -> nb::Result<u16, Self::Error> {
        Ok(self.convert(Pin::channel()))
    }
}
