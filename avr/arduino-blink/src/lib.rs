#![no_std]

//! `arduino-blink`
//! ===============
//! Blink the on-board LED of popular AVR dev-boards.
//!
//! This crate picks, per board, which pin carries the LED, how fast the CPU is clocked and which
//! USART is wired to the USB-serial bridge.  The blinking itself lives in `blink-generic`.
//!
//! **Note**: This version of the documentation was built for
#![cfg_attr(feature = "arduino-uno", doc = "**Arduino Uno**.")]
#![cfg_attr(feature = "arduino-nano", doc = "**Arduino Nano**.")]
#![cfg_attr(feature = "arduino-mega2560", doc = "**Arduino Mega 2560**.")]
#![cfg_attr(feature = "arduino-leonardo", doc = "**Arduino Leonardo**.")]
//! This means that only items which are available for this board are visible.  If you are using a
//! different board, try building the documentation locally with:
//!
//! ```text
//! cargo doc --features <your-board> --open
//! ```
//!
//! # Example
//! ```ignore
//! #![no_std]
//! #![no_main]
//!
//! use panic_halt as _;
//!
//! #[arduino_blink::entry]
//! fn main() -> ! {
//!     let dp = arduino_blink::Peripherals::take().unwrap();
//!     let led = arduino_blink::led!(dp);
//!
//!     arduino_blink::run(led, arduino_blink::BlinkConfig::DEFAULT)
//! }
//! ```

#[cfg(not(feature = "board-selected"))]
compile_error!(
    "This crate requires you to specify your target Arduino board as a feature.

    Please select one of the following

    * arduino-uno
    * arduino-nano
    * arduino-mega2560
    * arduino-leonardo
    "
);

/// Attribute to declare the entry point of the program
///
/// Exactly one entry point must be declared in the whole dependency graph and
/// the signature of the entry function must be `fn() -> !`.
///
/// See [`avr_device::entry`](https://docs.rs/avr-device/latest/avr_device/attr.entry.html).
#[cfg(feature = "rt")]
pub use avr_device::entry;

#[doc(no_inline)]
#[cfg(feature = "mcu-atmega")]
pub use atmega_blink::pac;

#[doc(no_inline)]
#[cfg(feature = "board-selected")]
pub use atmega_blink::Peripherals;

pub use blink_generic::blink::{BlinkConfig, Blinker};
pub use blink_generic::port::{self, Level, PinMode};
pub use blink_generic::prelude;

#[cfg(feature = "board-selected")]
pub mod clock {
    pub use blink_generic::clock::*;

    /// Every supported board runs its ATmega off a 16 MHz crystal.
    pub type DefaultClock = MHz16;
}

#[cfg(feature = "board-selected")]
pub use clock::DefaultClock;

/// Busy-wait delay at the board's clock speed.
#[cfg(feature = "board-selected")]
pub type Delay = atmega_blink::Delay<DefaultClock>;

/// A [`Delay`] spinning the CPU of this board.
#[cfg(feature = "board-selected")]
pub fn new_delay() -> Delay {
    Delay::new(atmega_blink::AvrSpin)
}

cfg_if::cfg_if! {
    if #[cfg(any(feature = "arduino-uno", feature = "arduino-nano"))] {
        /// Digital pin 13, the LED marked "L".
        pub type LedPin = atmega_blink::port::PB5;
        pub const LED_NAME: &str = "PB5";
        /// USART wired to the USB-serial bridge.
        pub type Serial = atmega_blink::usart::Usart0<DefaultClock>;
    } else if #[cfg(feature = "arduino-mega2560")] {
        /// Digital pin 13, the LED marked "L".
        pub type LedPin = atmega_blink::port::PB7;
        pub const LED_NAME: &str = "PB7";
        /// USART wired to the USB-serial bridge.
        pub type Serial = atmega_blink::usart::Usart0<DefaultClock>;
    } else if #[cfg(feature = "arduino-leonardo")] {
        /// Digital pin 13, the LED marked "L".
        pub type LedPin = atmega_blink::port::PC7;
        pub const LED_NAME: &str = "PC7";
        /// USART on the `D0`/`D1` header pins.  The Leonardo's USB port is native USB, not a
        /// serial bridge, so an external adapter is needed to read the log.
        pub type Serial = atmega_blink::usart::Usart1<DefaultClock>;
    }
}

/// The LED pin, still in its reset state.
#[cfg(feature = "board-selected")]
pub type Led = blink_generic::port::Pin<port::mode::Input, LedPin>;

/// Configure the LED pin as output and blink it forever.
#[cfg(feature = "board-selected")]
pub fn run(led: Led, config: BlinkConfig) -> ! {
    blink_generic::blink::run(led, new_delay(), config)
}

/// Convenience macro to take the LED pin from the peripherals.
///
/// # Example
///
/// ```no_run
/// let dp = arduino_blink::Peripherals::take().unwrap();
/// let led = arduino_blink::led!(dp);
/// ```
#[cfg(any(feature = "arduino-uno", feature = "arduino-nano"))]
#[macro_export]
macro_rules! led {
    ($p:expr) => {
        $crate::__atmega_blink::pins!($p).pb5
    };
}
#[cfg(feature = "arduino-mega2560")]
#[macro_export]
macro_rules! led {
    ($p:expr) => {
        $crate::__atmega_blink::pins!($p).pb7
    };
}
#[cfg(feature = "arduino-leonardo")]
#[macro_export]
macro_rules! led {
    ($p:expr) => {
        $crate::__atmega_blink::pins!($p).pc7
    };
}

#[doc(hidden)]
pub use atmega_blink as __atmega_blink;

/// Convenience macro to instantiate the [`Serial`] log output of this board.
///
/// # Example
/// ```no_run
/// use arduino_blink::prelude::*;
///
/// let dp = arduino_blink::Peripherals::take().unwrap();
/// let mut serial = arduino_blink::default_serial!(dp, 57600);
/// ufmt::uwriteln!(&mut serial, "Hello from Arduino!\r").unwrap_infallible();
/// ```
#[cfg(any(
    feature = "arduino-uno",
    feature = "arduino-nano",
    feature = "arduino-mega2560"
))]
#[macro_export]
macro_rules! default_serial {
    ($p:expr, $baud:expr) => {
        $crate::Serial::new($p.USART0, $baud)
    };
}
#[cfg(feature = "arduino-leonardo")]
#[macro_export]
macro_rules! default_serial {
    ($p:expr, $baud:expr) => {
        $crate::Serial::new($p.USART1, $baud)
    };
}
