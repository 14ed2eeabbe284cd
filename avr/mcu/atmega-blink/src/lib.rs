#![no_std]
#![feature(asm_experimental_arch)]

//! `atmega-blink`
//! ==============
//! Register-level support for blinking an LED on ATmega* microcontrollers.
//!
//! **Note**: This version of the documentation was built for
#![cfg_attr(feature = "atmega328p", doc = "**ATmega328P**.")]
#![cfg_attr(feature = "atmega2560", doc = "**ATmega2560**.")]
#![cfg_attr(feature = "atmega32u4", doc = "**ATmega32U4**.")]
//! This means that only items which are available for this MCU are visible.  If you are using
//! a different chip, try building the documentation locally with:
//!
//! ```text
//! cargo doc --features <your-mcu> --open
//! ```

#[cfg(all(
	not(feature = "device-selected"),
	not(feature = "disable-device-selection-error")
))]
compile_error!(
	"This crate requires you to specify your target chip as a feature.

    Please select one of the following

    * atmega328p
    * atmega2560
    * atmega32u4
    "
);

/// Reexport of `atmega2560` from `avr-device`
///
#[cfg(feature = "atmega2560")]
pub use avr_device::atmega2560 as pac;
/// Reexport of `atmega328p` from `avr-device`
///
#[cfg(feature = "atmega328p")]
pub use avr_device::atmega328p as pac;
/// Reexport of `atmega32u4` from `avr-device`
///
#[cfg(feature = "atmega32u4")]
pub use avr_device::atmega32u4 as pac;

/// See [`avr_device::entry`](https://docs.rs/avr-device/latest/avr_device/attr.entry.html).
#[cfg(feature = "rt")]
pub use avr_device::entry;

#[cfg(feature = "device-selected")]
pub use pac::Peripherals;

pub use blink_generic::clock;
pub use blink_generic::prelude;

pub mod delay;
pub use delay::{AvrSpin, Delay};

#[cfg(feature = "device-selected")]
pub mod port;
#[cfg(feature = "device-selected")]
pub use port::Pins;

#[cfg(feature = "device-selected")]
pub mod usart;

#[cfg(any(feature = "atmega328p", feature = "atmega2560"))]
#[macro_export]
macro_rules! pins {
	($p:expr) => {
		$crate::Pins::new($p.PORTB)
	};
}
#[cfg(feature = "atmega32u4")]
#[macro_export]
macro_rules! pins {
	($p:expr) => {
		$crate::Pins::new($p.PORTB, $p.PORTC)
	};
}
