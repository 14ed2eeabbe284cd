//! Digital IO pins
//!
//! A platform exposes each pin through [`PinOps`], which is the raw capability to flip the
//! direction bit and the output latch.  Firmware never uses [`PinOps`] directly; it goes through
//! [`Pin`], whose mode is part of its type:
//!
//! ```
//! use blink_generic::port::{mode, Pin};
//! use blink_generic::sim::{SimClock, SimPin};
//!
//! let clock = SimClock::new();
//! let pin: Pin<mode::Input, _> = Pin::new(SimPin::new(&clock));
//! let mut led = pin.into_output();
//! led.toggle();
//! assert!(led.is_set_high());
//! ```
//!
//! Toggling an input does not compile, so a pin is always configured before it is driven.

use core::convert::Infallible;
use core::marker::PhantomData;

/// Pin modes, as typestate markers.
pub mod mode {
    /// Any pin mode.
    pub trait Io: sealed::Sealed {}

    /// Pin is configured as a digital input (the AVR reset state).
    pub struct Input;
    /// Pin is configured as a digital output.
    pub struct Output;

    impl Io for Input {}
    impl Io for Output {}

    mod sealed {
        pub trait Sealed {}
        impl Sealed for super::Input {}
        impl Sealed for super::Output {}
    }
}

/// Logic level of a pin.
#[derive(ufmt::derive::uDebug, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

impl core::ops::Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl ufmt::uDisplay for Level {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(match self {
            Level::Low => "LOW",
            Level::High => "HIGH",
        })
    }
}

/// Value of a pin's direction bit.
#[derive(ufmt::derive::uDebug, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinMode {
    #[default]
    Input,
    Output,
}

impl ufmt::uDisplay for PinMode {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(match self {
            PinMode::Input => "input",
            PinMode::Output => "output",
        })
    }
}

/// Register-level access to a single pin.
///
/// Implementations own exactly one pin.  Methods are infallible: register writes cannot be
/// refused.
pub trait PinOps {
    /// Write the direction bit.
    fn set_pin_direction(&mut self, mode: PinMode);

    /// Read back the direction bit.
    fn pin_direction(&self) -> PinMode;

    /// Invert the output latch.
    fn toggle_pin_level(&mut self);

    /// Drive the output latch to `level`.
    fn set_pin_level(&mut self, level: Level);

    /// Read back the output latch.
    fn pin_level(&self) -> Level;
}

/// A pin in mode `MODE`, backed by the platform pin `PIN`.
pub struct Pin<MODE, PIN> {
    pin: PIN,
    _mode: PhantomData<MODE>,
}

impl<PIN: PinOps> Pin<mode::Input, PIN> {
    /// Wrap a pin that is still in its reset state (input).
    pub fn new(pin: PIN) -> Self {
        Pin {
            pin,
            _mode: PhantomData,
        }
    }
}

impl<MODE: mode::Io, PIN: PinOps> Pin<MODE, PIN> {
    /// Convert this pin into an output pin.
    ///
    /// The output latch keeps whatever level it had, so the pin starts driving the hardware
    /// default (LOW after reset).
    pub fn into_output(mut self) -> Pin<mode::Output, PIN> {
        self.pin.set_pin_direction(PinMode::Output);
        Pin {
            pin: self.pin,
            _mode: PhantomData,
        }
    }

    /// Read the direction register for this pin.
    pub fn direction(&self) -> PinMode {
        self.pin.pin_direction()
    }

    /// Borrow the platform pin.
    pub fn inner(&self) -> &PIN {
        &self.pin
    }
}

impl<PIN: PinOps> Pin<mode::Output, PIN> {
    /// Set pin high (pull it to supply voltage).
    pub fn set_high(&mut self) {
        self.pin.set_pin_level(Level::High)
    }

    /// Set pin low (pull it to GND).
    pub fn set_low(&mut self) {
        self.pin.set_pin_level(Level::Low)
    }

    /// Toggle a high pin to low and a low pin to high.
    pub fn toggle(&mut self) {
        self.pin.toggle_pin_level()
    }

    /// Level this pin is currently driving.
    pub fn level(&self) -> Level {
        self.pin.pin_level()
    }

    /// Check whether the pin is set high.
    ///
    /// *Note*: The electrical state of the pin might differ due to external circuitry.
    pub fn is_set_high(&self) -> bool {
        self.level().is_high()
    }

    /// Check whether the pin is set low.
    pub fn is_set_low(&self) -> bool {
        self.level().is_low()
    }
}

impl<PIN: PinOps> embedded_hal::digital::ErrorType for Pin<mode::Output, PIN> {
    type Error = Infallible;
}

impl<PIN: PinOps> embedded_hal::digital::OutputPin for Pin<mode::Output, PIN> {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Pin::set_high(self);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Pin::set_low(self);
        Ok(())
    }
}

impl<PIN: PinOps> embedded_hal::digital::StatefulOutputPin for Pin<mode::Output, PIN> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(Pin::is_set_high(self))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(Pin::is_set_low(self))
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        Pin::toggle(self);
        Ok(())
    }
}
