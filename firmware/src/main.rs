#![no_main]
#![no_std]
#![warn(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::ptr_as_ptr
)]

use adc_uart::adc::Adc;
use adc_uart::driver::Driver;
use adc_uart::regs::{Block, Mmio};
use adc_uart::serial::Serial;
use adc_uart::tim::Timer;
use adc_uart::{config, device, rcc};
use cortex_m_rt::entry;
use defmt_rtt as _; // global logger
use stm32f4xx_hal::pac;

use panic_probe as _; // panicking-behavior

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}

/// The register blocks the drivers address must be the ones the PAC hands out.
fn check_block<T>(name: &str, block: Block, ptr: *const T) {
    let addr = ptr as usize;
    defmt::assert_eq!(
        block.base() as usize,
        addr,
        "register block {} at wrong address",
        name
    );
}

#[entry]
fn main() -> ! {
    defmt::info!("Dumping config...");

    config::dump_to_log();

    defmt::info!("Starting init...");

    // Claimed and never released: from here on, the drivers below are the only users.
    let _peripherals = defmt::unwrap!(pac::Peripherals::take());

    check_block("RCC", device::rcc::BLOCK, pac::RCC::ptr());
    check_block("PWR", device::pwr::BLOCK, pac::PWR::ptr());
    check_block("FLASH", device::flash::BLOCK, pac::FLASH::ptr());
    check_block("GPIOA", device::gpioa::BLOCK, pac::GPIOA::ptr());
    check_block("TIM6", device::tim6::BLOCK, pac::TIM6::ptr());
    check_block("USART2", device::usart2::BLOCK, pac::USART2::ptr());
    check_block("ADC1", device::adc1::BLOCK, pac::ADC1::ptr());
    check_block("ADC_COMMON", device::adc_common::BLOCK, pac::ADC_COMMON::ptr());

    // Safety: `_peripherals` owns every peripheral and is never dropped or used,
    // and the block addresses were just checked against the PAC
    let bus = unsafe { Mmio::new() };

    defmt::info!("Configuring clocks...");

    rcc::configure(&bus);

    defmt::info!("Configuring delay timer...");

    let timer = Timer::configure(&bus);

    defmt::info!("Configuring serial...");

    let serial = Serial::configure(&bus);

    defmt::info!("Configuring ADC...");

    let adc = Adc::configure(&bus);

    defmt::info!("Enabling ADC...");

    let adc = adc.enable();

    defmt::info!("Finished init.");

    let mut driver = Driver::new(timer, serial, adc);

    driver.run(|reading| {
        if config::debug::LOG_SAMPLES {
            defmt::println!(
                "Sample: {} ({=f32} V), sent {} bytes",
                reading.raw,
                reading.volts,
                reading.sent
            );
        }
    })
}
