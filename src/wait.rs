//! Busy-wait polling.
//!
//! All synchronization with the hardware is done by spinning on status flags.
//! The firmware waits [`Forever`], matching the fact that a peripheral which never becomes ready
//! is a permanent hang with no recovery. [`MaxPolls`] is a bounded drop-in replacement.

use core::convert::Infallible;

/// When to give up on a wait.
pub trait Deadline {
    type Error;

    /// Called once per unsuccessful poll.
    fn poll(&mut self) -> Result<(), Self::Error>;
}

/// Never give up.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Forever;

impl Deadline for Forever {
    type Error = Infallible;

    #[inline(always)]
    fn poll(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Give up after a fixed number of unsuccessful polls.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MaxPolls {
    remaining: u32,
}

impl MaxPolls {
    pub const fn new(polls: u32) -> Self {
        Self { remaining: polls }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimedOut;

impl Deadline for MaxPolls {
    type Error = TimedOut;

    fn poll(&mut self) -> Result<(), Self::Error> {
        match self.remaining.checked_sub(1) {
            Some(remaining) => {
                self.remaining = remaining;
                Ok(())
            }
            None => Err(TimedOut),
        }
    }
}

/// Spin until `ready` returns true, or the deadline expires.
#[inline]
pub fn until<D: Deadline>(deadline: &mut D, mut ready: impl FnMut() -> bool) -> Result<(), D::Error> {
    while !ready() {
        deadline.poll()?;
        core::hint::spin_loop();
    }
    Ok(())
}
