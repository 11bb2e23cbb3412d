//! Register access.
//!
//! Every peripheral register touched by the firmware is named in [`crate::device`],
//! and every access goes through a [`Bus`], so the same driver code runs against
//! real memory-mapped hardware ([`Mmio`]) and against a simulated register file in tests.

use core::ptr::{read_volatile, write_volatile};

/// A 32-bit peripheral register, identified by its absolute address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Register(u32);

impl Register {
    pub const fn at(addr: u32) -> Self {
        Self(addr)
    }

    pub const fn addr(self) -> u32 {
        self.0
    }
}

/// A block of registers starting at a fixed base address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Block(u32);

impl Block {
    pub const fn at(base: u32) -> Self {
        Self(base)
    }

    pub const fn base(self) -> u32 {
        self.0
    }

    pub const fn reg(self, offset: u32) -> Register {
        Register(self.0 + offset)
    }
}

/// A contiguous bit field within a register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    offset: u8,
    width: u8,
}

impl Field {
    /// A single-bit field.
    pub const fn bit(offset: u8) -> Self {
        Self::bits(offset, 1)
    }

    pub const fn bits(offset: u8, width: u8) -> Self {
        assert!(width > 0 && offset as u32 + width as u32 <= 32);
        Self { offset, width }
    }

    /// The `width` low bits, not yet shifted into place.
    pub const fn max(self) -> u32 {
        u32::MAX >> (32 - self.width as u32)
    }

    pub const fn mask(self) -> u32 {
        self.max() << self.offset
    }
}

/// The contents of a register.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Word(pub u32);

impl Word {
    pub const RESET: Word = Word(0);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn get(self, field: Field) -> u32 {
        (self.0 & field.mask()) >> field.offset
    }

    pub const fn is_set(self, field: Field) -> bool {
        self.0 & field.mask() != 0
    }

    /// Replace the contents of `field` with `value`.
    ///
    /// Bits of `value` that do not fit in the field are an error (checked in debug mode).
    pub const fn with(self, field: Field, value: u32) -> Self {
        debug_assert!(value <= field.max());
        Self((self.0 & !field.mask()) | ((value << field.offset) & field.mask()))
    }

    /// Set every bit of `field`.
    pub const fn set(self, field: Field) -> Self {
        Self(self.0 | field.mask())
    }

    /// Clear every bit of `field`.
    pub const fn clear(self, field: Field) -> Self {
        Self(self.0 & !field.mask())
    }
}

/// Read/write access to peripheral registers.
///
/// Accesses take `&self`: registers are shared hardware state, and a read may itself have
/// side effects (e.g. reading a UART data register clears its receive flag).
pub trait Bus {
    fn read(&self, reg: Register) -> Word;

    fn write(&self, reg: Register, value: Word);

    /// Read-modify-write.
    ///
    /// Not atomic, which is fine since nothing else runs concurrently.
    fn modify(&self, reg: Register, f: impl FnOnce(Word) -> Word) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }
}

/// Volatile access to the real memory-mapped registers.
#[derive(Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    ///
    /// The caller must own every peripheral named in [`crate::device`] for as long as the
    /// returned value (or anything borrowing it) is alive, and the program must be running on
    /// the device that [`crate::device`] describes.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl Bus for Mmio {
    #[inline(always)]
    fn read(&self, reg: Register) -> Word {
        // Safety: guaranteed by the contract of `Mmio::new`
        Word(unsafe { read_volatile(reg.addr() as *const u32) })
    }

    #[inline(always)]
    fn write(&self, reg: Register, value: Word) {
        // Safety: guaranteed by the contract of `Mmio::new`
        unsafe { write_volatile(reg.addr() as *mut u32, value.bits()) }
    }
}
