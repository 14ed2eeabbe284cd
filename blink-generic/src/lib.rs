#![no_std]

//! `blink-generic`
//! ===============
//! MCU-generic definitions shared by the blink firmware crates.
//!
//! This crate knows nothing about registers.  It provides:
//!
//! * [`port`]: the [`PinOps`][port::PinOps] capability every platform implements, and the
//!   [`Pin`][port::Pin] typestate wrapper built on top of it.
//! * [`clock`]: CPU clock speeds, used to turn durations into cycle counts.
//! * [`delay`]: a busy-wait [`Delay`][delay::Delay] over a platform-provided cycle spinner.
//! * [`blink`]: the blink loop itself.
//! * [`sim`] (feature `sim`): a host-side simulated pin and virtual clock for testing the above.

#[cfg(any(test, feature = "sim"))]
extern crate alloc;

pub mod blink;
pub mod clock;
pub mod delay;
pub mod port;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use blink::{BlinkConfig, Blinker};
pub use port::{Level, Pin, PinMode, PinOps};

pub mod prelude {
    pub use embedded_hal::delay::DelayNs as _embedded_hal_delay_DelayNs;
    pub use embedded_hal::digital::OutputPin as _embedded_hal_digital_OutputPin;
    pub use embedded_hal::digital::StatefulOutputPin as _embedded_hal_digital_StatefulOutputPin;
    pub use ufmt::uWrite as _ufmt_uWrite;
    pub use unwrap_infallible::UnwrapInfallible as _unwrap_infallible_UnwrapInfallible;
}
