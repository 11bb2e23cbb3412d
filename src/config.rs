/// Dump the compile-time configuration to the debug log.
#[cfg(feature = "defmt")]
pub fn dump_to_log() {
    defmt::info!(
        "\n\
        Debugging flags:\n\
        - LOG_SAMPLES: {}\n\
        Clocks:\n\
        - HSE_FREQ: {} Hz\n\
        - SYSCLK:   {} Hz (PLL M={} N={} P={})\n\
        - HCLK:     {} Hz\n\
        - PCLK1:    {} Hz (timers {} Hz)\n\
        - PCLK2:    {} Hz\n\
        - FLASH_LATENCY: {} WS\n\
        Timer:\n\
        - TICK: {} Hz (PSC={})\n\
        Serial:\n\
        - BAUD: {} (BRR mantissa={} fraction={})\n\
        ADC:\n\
        - ADCCLK: {} Hz\n\
        - CHANNEL: {}\n\
        - RESOLUTION_BITS: {}\n\
        Driver:\n\
        - SAMPLE_PERIOD: {} ms\n\
        ",
        debug::LOG_SAMPLES,
        clk::HSE_FREQ.to_Hz(),
        clk::SYSCLK.to_Hz(),
        clk::PLL_M,
        clk::PLL_N,
        clk::PLL_P,
        clk::HCLK.to_Hz(),
        clk::PCLK1.to_Hz(),
        clk::TIMCLK1.to_Hz(),
        clk::PCLK2.to_Hz(),
        clk::FLASH_LATENCY,
        tim::TICK.to_Hz(),
        tim::PSC,
        serial::BAUD.to_Hz(),
        serial::BRR_MANTISSA,
        serial::BRR_FRACTION,
        adc::ADCCLK.to_Hz(),
        adc::CHANNEL,
        adc::RESOLUTION_BITS,
        driver::SAMPLE_PERIOD.to_millis(),
    );
}

/// Debugging flags
pub mod debug {
    /// Log every sample over the debug channel, in addition to sending it over serial
    pub const LOG_SAMPLES: bool = true;
}

/// Clock configuration
///
/// See clock tree in RM0390, figure 13.
/// Rough layout:
///
///   HSE -> /M -> xN -> /P -> SYSCLK -> AHB prescaler -> HCLK -> APB1 prescaler -> PCLK1 (x2 for timers)
///                                        / 1,2..512            |   / 1,2,4,8,16
///                                                              |
///                                                              -> APB2 prescaler -> PCLK2
///                                                                  / 1,2,4,8,16  |
///                                                                                -> ADC prescaler -> ADCCLK
///                                                                                    / 2,4,6,8
pub mod clk {
    use fugit::HertzU32;

    /// 8MHz crystal on the board
    pub const HSE_FREQ: HertzU32 = HertzU32::MHz(8);

    /// VCO input = HSE / M (should be 1-2MHz, 2MHz reduces jitter)
    pub const PLL_M: u32 = 4;
    /// VCO output = VCO input * N (100-432MHz)
    pub const PLL_N: u32 = 180;
    /// SYSCLK = VCO output / P
    pub const PLL_P: u32 = 2;

    const VCO_IN_HZ: u32 = HSE_FREQ.to_Hz() / PLL_M;
    const VCO_OUT_HZ: u32 = VCO_IN_HZ * PLL_N;

    const _: () = assert!(HSE_FREQ.to_Hz() % PLL_M == 0);
    const _: () = assert!(VCO_IN_HZ >= 1_000_000 && VCO_IN_HZ <= 2_000_000);
    const _: () = assert!(VCO_OUT_HZ >= 100_000_000 && VCO_OUT_HZ <= 432_000_000);

    /// Max 180MHz (with overdrive off, regulator at scale 1)
    pub const SYSCLK: HertzU32 = HertzU32::Hz(VCO_OUT_HZ / PLL_P);
    pub const SYSCLK_HZ: u32 = SYSCLK.to_Hz();
    const _: () = assert!(SYSCLK_HZ <= 180_000_000);

    /// AHB prescaler @ /1
    pub const AHB_DIV: u32 = 1;
    pub const HCLK: HertzU32 = HertzU32::Hz(SYSCLK_HZ / AHB_DIV);

    /// APB1 prescaler @ /4 (max 45MHz)
    pub const APB1_DIV: u32 = 4;
    pub const PCLK1: HertzU32 = HertzU32::Hz(HCLK.to_Hz() / APB1_DIV);
    const _: () = assert!(PCLK1.to_Hz() <= 45_000_000);

    /// APB1 timers run at twice PCLK1 whenever the APB1 prescaler divides
    pub const TIMCLK1: HertzU32 = if APB1_DIV == 1 {
        PCLK1
    } else {
        HertzU32::Hz(PCLK1.to_Hz() * 2)
    };

    /// APB2 prescaler @ /2 (max 90MHz)
    pub const APB2_DIV: u32 = 2;
    pub const PCLK2: HertzU32 = HertzU32::Hz(HCLK.to_Hz() / APB2_DIV);
    const _: () = assert!(PCLK2.to_Hz() <= 90_000_000);

    /// One wait state per 30MHz of HCLK (2.7-3.6V supply)
    pub const FLASH_LATENCY: u32 = (HCLK.to_Hz() - 1) / 30_000_000;
    const _: () = assert!(FLASH_LATENCY <= 15);
}

/// Delay timer (TIM6) configuration
pub mod tim {
    use crate::config;
    use fugit::HertzU32;

    /// Counter increments once per microsecond
    pub const TICK: HertzU32 = HertzU32::MHz(1);

    pub const PSC: u32 = config::clk::TIMCLK1.to_Hz() / TICK.to_Hz() - 1;
    const _: () = assert!(config::clk::TIMCLK1.to_Hz() % TICK.to_Hz() == 0);
    const _: () = assert!(PSC <= 0xffff);

    /// Free-running over the whole 16-bit range
    pub const ARR: u32 = 0xffff;
}

/// Serial (USART2) configuration
pub mod serial {
    use crate::config;
    use fugit::HertzU32;

    pub const BAUD: HertzU32 = HertzU32::Hz(115_200);

    /// USARTDIV in 1/16ths, rounded to nearest (16x oversampling)
    const USARTDIV_X16: u32 = (config::clk::PCLK1.to_Hz() + BAUD.to_Hz() / 2) / BAUD.to_Hz();
    pub const BRR_MANTISSA: u32 = USARTDIV_X16 >> 4;
    pub const BRR_FRACTION: u32 = USARTDIV_X16 & 0xf;
    const _: () = assert!(BRR_MANTISSA > 0 && BRR_MANTISSA <= 0xfff);

    /// PA2
    pub const TX_PIN: u8 = 2;
    /// PA3
    pub const RX_PIN: u8 = 3;

    /// Passed along with every line; has no effect on transmission.
    pub const SEND_TIMEOUT_MS: u32 = 300;
}

/// ADC configuration
pub mod adc {
    use crate::config;
    use fugit::HertzU32;

    /// ADC prescaler @ /4 (max 36MHz)
    pub const CLK_DIV: u32 = 4;
    pub const ADCCLK: HertzU32 = HertzU32::Hz(config::clk::PCLK2.to_Hz() / CLK_DIV);
    const _: () = assert!(ADCCLK.to_Hz() <= 36_000_000);

    pub const RESOLUTION_BITS: u32 = 12;
    pub const MAX_POSSIBLE_SAMPLE: u16 = (1 << RESOLUTION_BITS) - 1;

    /// Channels given a sample time and pin setup.
    /// Only the first one is ever converted.
    pub const SCAN_CHANNELS: [u8; 2] = [1, 4];
    #[allow(clippy::cast_possible_truncation)]
    pub const SEQUENCE_LEN: u32 = SCAN_CHANNELS.len() as u32;
    const _: () = assert!(SEQUENCE_LEN >= 1 && SEQUENCE_LEN <= 16);

    /// Channel sampled by the main loop (PA1)
    pub const CHANNEL: u8 = SCAN_CHANNELS[0];

    /// Iterations of the busy loop after ADON, ~10us worth
    pub const STABILIZATION_LOOPS: u32 = 10_000;

    /// Reference voltage in volts
    pub const VREF: f32 = 3.3;

    /// Sample value that corresponds to `VREF`
    pub const FULL_SCALE: f32 = 4096.0;
}

/// Main loop configuration
pub mod driver {
    use fugit::MillisDurationU32;

    /// Delay between samples
    pub const SAMPLE_PERIOD: MillisDurationU32 = MillisDurationU32::millis(1000);
    const _: () = assert!(SAMPLE_PERIOD.to_millis() <= u16::MAX as u32);

    /// Capacity of the line buffer for one report
    pub const LINE_LEN: usize = 64;
}
