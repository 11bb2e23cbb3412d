//! Simulated register file, for running the drivers on the host.
//!
//! Registers are plain memory, plus just enough behaviour for every readiness flag the drivers
//! poll on to eventually assert: oscillator/PLL lock, clock switch status, the timer counter and
//! update flag, USART transmit-complete/receive-not-empty, and ADC end-of-conversion.
//! Conversions complete as soon as they are started unless [`Sim::set_conversion_polls`] says
//! otherwise.

use crate::device::{adc1, gpioa, rcc, tim6, usart2};
use crate::num::Truncate;
use crate::regs::{Bus, Register, Word};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};

#[derive(Default)]
struct State {
    regs: BTreeMap<Register, Word>,
    reads: BTreeMap<Register, usize>,
    writes: Vec<(Register, Word)>,
    ticks_per_read: u32,
    analog: BTreeMap<u8, u16>,
    conversion_polls: u32,
    /// Sample in flight, and the number of status reads left until it lands
    converting: Option<(u16, u32)>,
    tx: Vec<u8>,
    rx: VecDeque<u8>,
}

pub struct Sim {
    state: RefCell<State>,
}

impl Default for Sim {
    fn default() -> Self {
        Self::new()
    }
}

impl Sim {
    pub fn new() -> Self {
        let mut regs = BTreeMap::new();
        // HSION | HSIRDY | HSITRIM=16
        regs.insert(rcc::CR, Word(0x0000_0083));
        // PLLQ=4, PLLN=192, PLLM=16
        regs.insert(rcc::PLLCFGR, Word(0x2400_3010));
        // PA13..PA15 in alternate mode (debug port)
        regs.insert(gpioa::MODER, Word(0xa800_0000));
        Self {
            state: RefCell::new(State {
                regs,
                ticks_per_read: 1,
                ..State::default()
            }),
        }
    }

    /// How far the timer counter advances each time it is read.
    pub fn set_ticks_per_read(&self, ticks: u32) {
        self.state.borrow_mut().ticks_per_read = ticks;
    }

    /// Value produced by a conversion on `channel`.
    pub fn set_analog(&self, channel: u8, sample: u16) {
        self.state.borrow_mut().analog.insert(channel, sample);
    }

    /// Make each ADC conversion complete on the `polls`-th read of the status register after it
    /// is started, instead of immediately.
    pub fn set_conversion_polls(&self, polls: u32) {
        self.state.borrow_mut().conversion_polls = polls;
    }

    /// Bytes that will arrive on the serial receive line.
    pub fn queue_rx(&self, bytes: &[u8]) {
        let mut state = self.state.borrow_mut();
        state.rx.extend(bytes);
        let sr = state.get(usart2::SR).set(usart2::sr::RXNE);
        state.regs.insert(usart2::SR, sr);
    }

    /// Bytes transmitted so far, draining them.
    pub fn take_tx(&self) -> Vec<u8> {
        std::mem::take(&mut self.state.borrow_mut().tx)
    }

    /// Register contents, without triggering any read side effects.
    pub fn peek(&self, reg: Register) -> Word {
        self.state.borrow().get(reg)
    }

    /// Force register contents, without triggering any write side effects.
    pub fn poke(&self, reg: Register, value: Word) {
        self.state.borrow_mut().regs.insert(reg, value);
    }

    pub fn writes(&self) -> Vec<(Register, Word)> {
        self.state.borrow().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.state.borrow_mut().writes.clear();
    }

    pub fn reads_of(&self, reg: Register) -> usize {
        self.state.borrow().reads.get(&reg).copied().unwrap_or(0)
    }

    /// Index (in the write log) of the first write to `reg` satisfying `pred`.
    pub fn first_write(&self, reg: Register, pred: impl Fn(Word) -> bool) -> Option<usize> {
        self.state
            .borrow()
            .writes
            .iter()
            .position(|&(r, w)| r == reg && pred(w))
    }
}

impl State {
    fn get(&self, reg: Register) -> Word {
        self.regs.get(&reg).copied().unwrap_or_default()
    }

    fn update(&mut self, reg: Register, f: impl FnOnce(Word) -> Word) {
        let value = f(self.get(reg));
        self.regs.insert(reg, value);
    }

    fn finish_conversion(&mut self, sample: u16) {
        self.regs.insert(adc1::DR, Word(sample.into()));
        self.update(adc1::SR, |w| w.set(adc1::sr::EOC));
    }
}

impl Bus for Sim {
    fn read(&self, reg: Register) -> Word {
        let mut state = self.state.borrow_mut();
        *state.reads.entry(reg).or_default() += 1;

        let value = state.get(reg);

        match reg {
            tim6::CNT if state.get(tim6::CR1).is_set(tim6::cr1::CEN) => {
                let next = value.get(tim6::cnt::CNT) + state.ticks_per_read;
                let arr = state.get(tim6::ARR).get(tim6::arr::ARR);
                let wrapped = if next > arr { next - arr - 1 } else { next };
                if next > arr {
                    state.update(tim6::SR, |w| w.set(tim6::sr::UIF));
                }
                state.regs.insert(tim6::CNT, Word(wrapped));
            }
            usart2::DR => {
                let byte = state.rx.pop_front();
                if let Some(byte) = byte {
                    state.regs.insert(usart2::DR, Word(byte.into()));
                }
                let more = !state.rx.is_empty();
                state.update(usart2::SR, |w| {
                    if more {
                        w.set(usart2::sr::RXNE)
                    } else {
                        w.clear(usart2::sr::RXNE)
                    }
                });
                return Word(byte.map_or(value.bits(), u32::from));
            }
            adc1::SR => {
                let converting = state.converting;
                if let Some((sample, polls)) = converting {
                    if polls <= 1 {
                        state.converting = None;
                        state.finish_conversion(sample);
                        return state.get(adc1::SR);
                    }
                    state.converting = Some((sample, polls - 1));
                }
            }
            adc1::DR => {
                state.update(adc1::SR, |w| w.clear(adc1::sr::EOC));
            }
            _ => {}
        }

        value
    }

    fn write(&self, reg: Register, value: Word) {
        let mut state = self.state.borrow_mut();
        state.writes.push((reg, value));
        let old = state.get(reg);
        state.regs.insert(reg, value);

        match reg {
            rcc::CR => {
                let hse = value.is_set(rcc::cr::HSEON);
                let pll = value.is_set(rcc::cr::PLLON);
                state.update(rcc::CR, |w| {
                    let w = if hse {
                        w.set(rcc::cr::HSERDY)
                    } else {
                        w.clear(rcc::cr::HSERDY)
                    };
                    if pll {
                        w.set(rcc::cr::PLLRDY)
                    } else {
                        w.clear(rcc::cr::PLLRDY)
                    }
                });
            }
            rcc::CFGR => {
                let sw = value.get(rcc::cfgr::SW);
                state.update(rcc::CFGR, |w| w.with(rcc::cfgr::SWS, sw));
            }
            tim6::CR1 => {
                if value.is_set(tim6::cr1::CEN) && !old.is_set(tim6::cr1::CEN) {
                    // the first overflow (which loads PSC) happens at the unprescaled rate; treat it as immediate
                    state.update(tim6::SR, |w| w.set(tim6::sr::UIF));
                }
            }
            usart2::DR => {
                let cr1 = state.get(usart2::CR1);
                if cr1.is_set(usart2::cr1::UE) && cr1.is_set(usart2::cr1::TE) {
                    let byte: u8 = value.get(usart2::dr::DR).truncate();
                    state.tx.push(byte);
                    state.update(usart2::SR, |w| w.set(usart2::sr::TC));
                } else {
                    state.update(usart2::SR, |w| w.clear(usart2::sr::TC));
                }
            }
            adc1::CR2 => {
                if value.is_set(adc1::cr2::SWSTART) && value.is_set(adc1::cr2::ADON) {
                    let channel: u8 = state.get(adc1::SQR3).get(adc1::sqr3::SQ1).truncate();
                    let sample = state.analog.get(&channel).copied().unwrap_or(0);
                    match state.conversion_polls {
                        0 => state.finish_conversion(sample),
                        polls => state.converting = Some((sample, polls)),
                    }
                }
                // SWSTART is cleared by hardware
                state.update(adc1::CR2, |w| w.clear(adc1::cr2::SWSTART));
            }
            _ => {}
        }
    }
}
