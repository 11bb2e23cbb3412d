//! Register map of the STM32F446 peripherals used by the firmware.
//!
//! Only the registers and fields that are actually touched are listed.
//! See RM0390 (STM32F446xx reference manual) for the full layout.

/// Reset and clock control
pub mod rcc {
    use crate::regs::{Block, Register};

    pub const BLOCK: Block = Block::at(0x4002_3800);

    pub const CR: Register = BLOCK.reg(0x00);
    pub const PLLCFGR: Register = BLOCK.reg(0x04);
    pub const CFGR: Register = BLOCK.reg(0x08);
    pub const AHB1ENR: Register = BLOCK.reg(0x30);
    pub const APB1ENR: Register = BLOCK.reg(0x40);
    pub const APB2ENR: Register = BLOCK.reg(0x44);

    pub mod cr {
        use crate::regs::Field;

        pub const HSEON: Field = Field::bit(16);
        pub const HSERDY: Field = Field::bit(17);
        pub const PLLON: Field = Field::bit(24);
        pub const PLLRDY: Field = Field::bit(25);
    }

    pub mod pllcfgr {
        use crate::regs::Field;

        pub const PLLM: Field = Field::bits(0, 6);
        pub const PLLN: Field = Field::bits(6, 9);
        pub const PLLP: Field = Field::bits(16, 2);
        pub const PLLSRC: Field = Field::bit(22);

        /// Encode the main PLL output divider (2, 4, 6 or 8).
        pub const fn pllp_bits(div: u32) -> u32 {
            match div {
                2 | 4 | 6 | 8 => div / 2 - 1,
                _ => panic!("invalid PLLP divider"),
            }
        }
    }

    pub mod cfgr {
        use crate::regs::Field;

        pub const SW: Field = Field::bits(0, 2);
        pub const SWS: Field = Field::bits(2, 2);
        pub const HPRE: Field = Field::bits(4, 4);
        pub const PPRE1: Field = Field::bits(10, 3);
        pub const PPRE2: Field = Field::bits(13, 3);

        /// `SW` / `SWS` value selecting the main PLL as system clock
        pub const SW_PLL: u32 = 0b10;

        /// Encode an AHB prescaler (1, 2, 4, ..., 512; 32 is not available).
        pub const fn hpre_bits(div: u32) -> u32 {
            match div {
                1 => 0b0000,
                2 => 0b1000,
                4 => 0b1001,
                8 => 0b1010,
                16 => 0b1011,
                64 => 0b1100,
                128 => 0b1101,
                256 => 0b1110,
                512 => 0b1111,
                _ => panic!("invalid AHB prescaler"),
            }
        }

        /// Encode an APB prescaler (1, 2, 4, 8 or 16).
        pub const fn ppre_bits(div: u32) -> u32 {
            match div {
                1 => 0b000,
                2 => 0b100,
                4 => 0b101,
                8 => 0b110,
                16 => 0b111,
                _ => panic!("invalid APB prescaler"),
            }
        }
    }

    pub mod ahb1enr {
        use crate::regs::Field;

        pub const GPIOAEN: Field = Field::bit(0);
    }

    pub mod apb1enr {
        use crate::regs::Field;

        pub const TIM6EN: Field = Field::bit(4);
        pub const USART2EN: Field = Field::bit(17);
        pub const PWREN: Field = Field::bit(28);
    }

    pub mod apb2enr {
        use crate::regs::Field;

        pub const ADC1EN: Field = Field::bit(8);
    }
}

/// Power control
pub mod pwr {
    use crate::regs::{Block, Register};

    pub const BLOCK: Block = Block::at(0x4000_7000);

    pub const CR: Register = BLOCK.reg(0x00);

    pub mod cr {
        use crate::regs::Field;

        pub const VOS: Field = Field::bits(14, 2);

        /// Regulator scale 1, required for 180 MHz
        pub const VOS_SCALE1: u32 = 0b11;
    }
}

/// Embedded flash interface
pub mod flash {
    use crate::regs::{Block, Register};

    pub const BLOCK: Block = Block::at(0x4002_3C00);

    pub const ACR: Register = BLOCK.reg(0x00);

    pub mod acr {
        use crate::regs::Field;

        pub const LATENCY: Field = Field::bits(0, 4);
        pub const PRFTEN: Field = Field::bit(8);
        pub const ICEN: Field = Field::bit(9);
        pub const DCEN: Field = Field::bit(10);
    }
}

/// General purpose I/O, port A
pub mod gpioa {
    use crate::regs::{Block, Register};

    pub const BLOCK: Block = Block::at(0x4002_0000);

    pub const MODER: Register = BLOCK.reg(0x00);
    pub const OSPEEDR: Register = BLOCK.reg(0x08);
    pub const AFRL: Register = BLOCK.reg(0x20);

    pub mod moder {
        use crate::regs::Field;

        pub const fn pin(n: u8) -> Field {
            Field::bits(n * 2, 2)
        }

        pub const ALTERNATE: u32 = 0b10;
        pub const ANALOG: u32 = 0b11;
    }

    pub mod ospeedr {
        use crate::regs::Field;

        pub const fn pin(n: u8) -> Field {
            Field::bits(n * 2, 2)
        }

        pub const HIGH: u32 = 0b11;
    }

    pub mod afrl {
        use crate::regs::Field;

        /// Alternate function selection for pins 0..=7
        pub const fn pin(n: u8) -> Field {
            assert!(n < 8);
            Field::bits(n * 4, 4)
        }

        /// USART1..3
        pub const AF7: u32 = 7;
    }
}

/// Basic timer 6
pub mod tim6 {
    use crate::regs::{Block, Register};

    pub const BLOCK: Block = Block::at(0x4000_1000);

    pub const CR1: Register = BLOCK.reg(0x00);
    pub const SR: Register = BLOCK.reg(0x10);
    pub const CNT: Register = BLOCK.reg(0x24);
    pub const PSC: Register = BLOCK.reg(0x28);
    pub const ARR: Register = BLOCK.reg(0x2C);

    pub mod cr1 {
        use crate::regs::Field;

        pub const CEN: Field = Field::bit(0);
    }

    pub mod sr {
        use crate::regs::Field;

        pub const UIF: Field = Field::bit(0);
    }

    pub mod cnt {
        use crate::regs::Field;

        pub const CNT: Field = Field::bits(0, 16);
    }

    pub mod psc {
        use crate::regs::Field;

        pub const PSC: Field = Field::bits(0, 16);
    }

    pub mod arr {
        use crate::regs::Field;

        pub const ARR: Field = Field::bits(0, 16);
    }
}

/// Universal synchronous/asynchronous receiver transmitter 2
pub mod usart2 {
    use crate::regs::{Block, Register};

    pub const BLOCK: Block = Block::at(0x4000_4400);

    pub const SR: Register = BLOCK.reg(0x00);
    pub const DR: Register = BLOCK.reg(0x04);
    pub const BRR: Register = BLOCK.reg(0x08);
    pub const CR1: Register = BLOCK.reg(0x0C);

    pub mod sr {
        use crate::regs::Field;

        pub const RXNE: Field = Field::bit(5);
        pub const TC: Field = Field::bit(6);
    }

    pub mod dr {
        use crate::regs::Field;

        pub const DR: Field = Field::bits(0, 9);
    }

    pub mod brr {
        use crate::regs::Field;

        pub const DIV_FRACTION: Field = Field::bits(0, 4);
        pub const DIV_MANTISSA: Field = Field::bits(4, 12);
    }

    pub mod cr1 {
        use crate::regs::Field;

        pub const RE: Field = Field::bit(2);
        pub const TE: Field = Field::bit(3);
        pub const M: Field = Field::bit(12);
        pub const UE: Field = Field::bit(13);
    }
}

/// Analog-to-digital converter 1
pub mod adc1 {
    use crate::regs::{Block, Register};

    pub const BLOCK: Block = Block::at(0x4001_2000);

    pub const SR: Register = BLOCK.reg(0x00);
    pub const CR1: Register = BLOCK.reg(0x04);
    pub const CR2: Register = BLOCK.reg(0x08);
    pub const SMPR2: Register = BLOCK.reg(0x10);
    pub const SQR1: Register = BLOCK.reg(0x2C);
    pub const SQR3: Register = BLOCK.reg(0x34);
    pub const DR: Register = BLOCK.reg(0x4C);

    pub mod sr {
        use crate::regs::Field;

        pub const EOC: Field = Field::bit(1);
    }

    pub mod cr1 {
        use crate::regs::Field;

        pub const SCAN: Field = Field::bit(8);
        pub const RES: Field = Field::bits(24, 2);

        pub const RES_12BIT: u32 = 0b00;
    }

    pub mod cr2 {
        use crate::regs::Field;

        pub const ADON: Field = Field::bit(0);
        pub const CONT: Field = Field::bit(1);
        pub const EOCS: Field = Field::bit(10);
        pub const ALIGN: Field = Field::bit(11);
        pub const SWSTART: Field = Field::bit(30);
    }

    pub mod smpr2 {
        use crate::regs::Field;

        /// Sample time selection for channels 0..=9
        pub const fn smp(channel: u8) -> Field {
            assert!(channel < 10);
            Field::bits(channel * 3, 3)
        }

        pub const SMP_3_CYCLES: u32 = 0b000;
    }

    pub mod sqr1 {
        use crate::regs::Field;

        /// Regular sequence length, minus one
        pub const L: Field = Field::bits(20, 4);
    }

    pub mod sqr3 {
        use crate::regs::Field;

        /// First conversion in the regular sequence
        pub const SQ1: Field = Field::bits(0, 5);

        /// Highest channel number SQ1 accepts (VBAT)
        pub const MAX_CHANNEL: u8 = 18;
    }

    pub mod dr {
        use crate::regs::Field;

        pub const DATA: Field = Field::bits(0, 16);
    }
}

/// Registers shared by all ADCs
pub mod adc_common {
    use crate::regs::{Block, Register};

    pub const BLOCK: Block = Block::at(0x4001_2300);

    pub const CCR: Register = BLOCK.reg(0x04);

    pub mod ccr {
        use crate::regs::Field;

        pub const ADCPRE: Field = Field::bits(16, 2);

        /// Encode the ADC clock prescaler (PCLK2 / 2, 4, 6 or 8).
        pub const fn adcpre_bits(div: u32) -> u32 {
            match div {
                2 | 4 | 6 | 8 => div / 2 - 1,
                _ => panic!("invalid ADC prescaler"),
            }
        }
    }
}
