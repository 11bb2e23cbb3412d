//! Core clock tree: HSE -> PLL -> SYSCLK, plus bus prescalers.

use crate::config;
use crate::device::{flash, pwr, rcc};
use crate::panic::OptionalExt;
use crate::regs::{Bus, Word};
use crate::wait::{self, Deadline, Forever};

/// Switch the system clock to the PLL, running from the external oscillator.
///
/// Blocks until the oscillator, the PLL and the clock switch are all ready.
/// Must run before any other peripheral is configured, since their timing depends on it.
pub fn configure(bus: &impl Bus) {
    configure_within(bus, &mut Forever).unwrap_infallible()
}

/// Like [`configure`], but gives up on any of the hardware waits once `deadline` expires.
///
/// The clock tree is left partially configured on timeout.
pub fn configure_within<D: Deadline>(bus: &impl Bus, deadline: &mut D) -> Result<(), D::Error> {
    // Step 1: start the external oscillator
    bus.modify(rcc::CR, |w| w.set(rcc::cr::HSEON));
    wait::until(deadline, || bus.read(rcc::CR).is_set(rcc::cr::HSERDY))?;

    // Step 2: power interface clock, and regulator scale 1 for full speed
    bus.modify(rcc::APB1ENR, |w| w.set(rcc::apb1enr::PWREN));
    bus.modify(pwr::CR, |w| w.with(pwr::cr::VOS, pwr::cr::VOS_SCALE1));

    // Step 3: flash wait states (must be set before raising the clock), caches, prefetch
    bus.write(
        flash::ACR,
        Word::RESET
            .set(flash::acr::ICEN)
            .set(flash::acr::DCEN)
            .set(flash::acr::PRFTEN)
            .with(flash::acr::LATENCY, config::clk::FLASH_LATENCY),
    );

    // Step 4: bus prescalers
    bus.modify(rcc::CFGR, |w| {
        w.with(rcc::cfgr::HPRE, rcc::cfgr::hpre_bits(config::clk::AHB_DIV))
            .with(rcc::cfgr::PPRE1, rcc::cfgr::ppre_bits(config::clk::APB1_DIV))
            .with(rcc::cfgr::PPRE2, rcc::cfgr::ppre_bits(config::clk::APB2_DIV))
    });

    // Step 5: PLL dividers/multiplier, fed from HSE
    bus.modify(rcc::PLLCFGR, |w| {
        w.with(rcc::pllcfgr::PLLM, config::clk::PLL_M)
            .with(rcc::pllcfgr::PLLN, config::clk::PLL_N)
            .with(rcc::pllcfgr::PLLP, rcc::pllcfgr::pllp_bits(config::clk::PLL_P))
            .set(rcc::pllcfgr::PLLSRC)
    });

    // Step 6: start the PLL
    bus.modify(rcc::CR, |w| w.set(rcc::cr::PLLON));
    wait::until(deadline, || bus.read(rcc::CR).is_set(rcc::cr::PLLRDY))?;

    // Step 7: switch over
    bus.modify(rcc::CFGR, |w| w.with(rcc::cfgr::SW, rcc::cfgr::SW_PLL));
    wait::until(deadline, || {
        bus.read(rcc::CFGR).get(rcc::cfgr::SWS) == rcc::cfgr::SW_PLL
    })?;

    Ok(())
}
