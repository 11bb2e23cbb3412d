//! Sample an analog input and report it over serial, once per second.
//!
//! Bare-metal drivers for the STM32F446 clock tree, TIM6, USART2 and ADC1, written against the
//! [`regs::Bus`] abstraction so they run unchanged on the host against a simulated register file.

#![cfg_attr(not(test), no_std)]

pub mod adc;
pub mod ascii;
pub mod config;
pub mod device;
pub mod driver;
pub mod num;
pub mod panic;
pub mod rcc;
pub mod regs;
pub mod report;
pub mod serial;
pub mod tim;
pub mod wait;

#[cfg(test)]
mod sim;
