//! Core clock speed management
//!
//! AVR microcontrollers support different core clock speeds.  Peripheral drivers need to know
//! about this speed to calculate timing parameters.  To make this as efficient as possible, the
//! clock speed is tracked as a compile-time constant.  This means peripheral drivers can do
//! compile-time calculation of timing parameters.
//!
//! # Example
//! ```
//! use blink_generic::clock::{Clock, MHz16};
//!
//! assert_eq!(MHz16::FREQ, 16_000_000);
//! assert_eq!(MHz16::cycles_per_ms(), 16_000);
//! ```

/// A clock speed
pub trait Clock {
    /// Frequency of this clock in Hz
    const FREQ: u32;

    /// CPU cycles elapsing in one millisecond, rounded up.
    fn cycles_per_ms() -> u32 {
        Self::FREQ.div_ceil(1_000)
    }

    /// CPU cycles elapsing in one microsecond, rounded up.
    fn cycles_per_us() -> u32 {
        Self::FREQ.div_ceil(1_000_000)
    }
}

/// 24 MHz Clock
#[derive(ufmt::derive::uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MHz24;
impl Clock for MHz24 {
    const FREQ: u32 = 24_000_000;
}

/// 20 MHz Clock
#[derive(ufmt::derive::uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MHz20;
impl Clock for MHz20 {
    const FREQ: u32 = 20_000_000;
}

/// 16 MHz Clock
#[derive(ufmt::derive::uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MHz16;
impl Clock for MHz16 {
    const FREQ: u32 = 16_000_000;
}

/// 12 MHz Clock
#[derive(ufmt::derive::uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MHz12;
impl Clock for MHz12 {
    const FREQ: u32 = 12_000_000;
}

/// 10 MHz Clock
#[derive(ufmt::derive::uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MHz10;
impl Clock for MHz10 {
    const FREQ: u32 = 10_000_000;
}

/// 8 MHz Clock
#[derive(ufmt::derive::uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MHz8;
impl Clock for MHz8 {
    const FREQ: u32 = 8_000_000;
}

/// 1 MHz Clock
#[derive(ufmt::derive::uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MHz1;
impl Clock for MHz1 {
    const FREQ: u32 = 1_000_000;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_per_unit() {
        assert_eq!(MHz16::cycles_per_ms(), 16_000);
        assert_eq!(MHz16::cycles_per_us(), 16);
        assert_eq!(MHz1::cycles_per_us(), 1);
        assert_eq!(MHz8::cycles_per_ms(), 8_000);
    }
}
