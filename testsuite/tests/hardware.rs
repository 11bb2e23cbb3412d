#![no_std]
#![no_main]

use adc_uart::adc::{Adc, Enabled};
use adc_uart::config;
use adc_uart::device::{rcc as rcc_regs, usart2};
use adc_uart::rcc;
use adc_uart::regs::{Bus, Mmio};
use adc_uart::serial::Serial;
use adc_uart::tim::Timer;
use adc_uart::wait::MaxPolls;
use cortex_m::peripheral::DWT;
use defmt::unwrap;
use defmt_rtt as _; // global logger
use panic_probe as _;
use stm32f4xx_hal::pac;

// Safety: the peripherals are claimed in `init`, before any test touches them
static BUS: Mmio = unsafe { Mmio::new() };

const CYC_PER_US: u32 = config::clk::SYSCLK_HZ / 1_000_000;

// WARNING will wrap-around eventually, use this for relative timing only
defmt::timestamp!("{=u32:us}", DWT::cycle_count() / CYC_PER_US);

/// Cycles elapsed while running `f`.
fn cycles(f: impl FnOnce()) -> u32 {
    let start = DWT::cycle_count();
    f();
    DWT::cycle_count().wrapping_sub(start)
}

fn assert_elapsed_us(elapsed: u32, us: u32) {
    let expected = us * CYC_PER_US;
    // the prescaler is not reset along with the counter, so each 1us wait can come up short
    let lower = expected - expected / 100;
    // loop and register access overhead
    let upper = expected + expected / 50;
    defmt::assert!(
        lower <= elapsed && elapsed <= upper,
        "Delay is incorrect: {} <= {} <= {}",
        lower,
        elapsed,
        upper
    );
}

#[defmt_test::tests]
mod tests {
    use super::*;

    struct State {
        timer: Timer<'static, Mmio>,
        serial: Serial<'static, Mmio>,
        adc: Adc<'static, Mmio, Enabled>,
    }

    #[init]
    fn init() -> State {
        let _dp = unwrap!(pac::Peripherals::take());
        let mut cp = unwrap!(pac::CorePeripherals::take());
        cp.DCB.enable_trace();
        cp.DWT.enable_cycle_counter();

        rcc::configure(&BUS);

        State {
            timer: Timer::configure(&BUS),
            serial: Serial::configure(&BUS),
            adc: Adc::configure(&BUS).enable(),
        }
    }

    #[test]
    fn system_clock_is_pll() {
        let cfgr = BUS.read(rcc_regs::CFGR);
        defmt::assert_eq!(cfgr.get(rcc_regs::cfgr::SWS), rcc_regs::cfgr::SW_PLL);
    }

    #[test]
    fn microsecond_delay(state: &mut State) {
        let elapsed = cycles(|| state.timer.delay_us(10_000));
        assert_elapsed_us(elapsed, 10_000);
    }

    #[test]
    fn millisecond_delay(state: &mut State) {
        let elapsed = cycles(|| state.timer.delay_ms(20));
        assert_elapsed_us(elapsed, 20_000);
    }

    #[test]
    fn conversion_in_range(state: &mut State) {
        for channel in config::adc::SCAN_CHANNELS {
            let sample = state.adc.convert(channel);
            defmt::info!("channel {}: {}", channel, sample);
            defmt::assert!(sample <= config::adc::MAX_POSSIBLE_SAMPLE);
        }
    }

    #[test]
    fn transmit_completes(state: &mut State) {
        unwrap!(state
            .serial
            .send_byte_within(b'\n', &mut MaxPolls::new(1_000_000))
            .ok());
        defmt::assert!(BUS.read(usart2::SR).is_set(usart2::sr::TC));
    }

    #[test]
    fn send_string_counts_bytes(state: &mut State) {
        let sent = state
            .serial
            .send_string(b"testsuite\r\n\0ignored", 64, config::serial::SEND_TIMEOUT_MS);
        defmt::assert_eq!(sent, 11);
    }
}
