//! On-target checks of the drivers, run with `cargo test` from this directory with a board attached.

#![no_std]
