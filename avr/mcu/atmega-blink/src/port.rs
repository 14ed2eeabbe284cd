//! Port pins, driven through the `DDRx`, `PORTx` and `PINx` registers.
//!
//! Each pin is a zero-sized type owning one bit of its port.  Read-modify-write sequences on
//! shared registers run with interrupts disabled; toggling is a single write of the pin's bit to
//! `PINx`, which the hardware turns into an inversion of the `PORTx` bit.

use blink_generic::port::{mode, Level, Pin, PinMode, PinOps};

macro_rules! impl_port_pins {
	(
		$(#[$pins_attr:meta])*
		pub struct Pins {
			$(
				$PORTX:ident($p:ident) {
					$($pxn:ident: $Pxn:ident = $i:literal,)+
				}
			)+
		}
	) => {
		$(#[$pins_attr])*
		pub struct Pins {
			$($(
				pub $pxn: Pin<mode::Input, $Pxn>,
			)+)+
		}

		impl Pins {
			#[allow(non_snake_case)]
			pub fn new($($PORTX: crate::pac::$PORTX,)+) -> Self {
				$(drop($PORTX);)+
				Pins {
					$($(
						$pxn: Pin::new($Pxn { _private: () }),
					)+)+
				}
			}
		}

		$($(
			impl_port_pins!(@pin $PORTX, $p, $Pxn, $i);
		)+)+
	};

	(@pin $PORTX:ident, $p:ident, $Pxn:ident, $i:literal) => {
		paste::paste! {
			#[doc = concat!("Pin `", stringify!($Pxn), "`.")]
			pub struct $Pxn {
				_private: (),
			}

			impl $Pxn {
				const MASK: u8 = 1 << $i;

				#[inline(always)]
				fn regs() -> &'static <crate::pac::$PORTX as core::ops::Deref>::Target {
					// SAFETY: the register block is always mapped; `Pins::new` consumed the
					// peripheral, so this type is the only accessor for its bit.
					unsafe { &*crate::pac::$PORTX::ptr() }
				}
			}

			impl PinOps for $Pxn {
				#[inline(always)]
				fn set_pin_direction(&mut self, mode: PinMode) {
					avr_device::interrupt::free(|_| {
						Self::regs().[<ddr $p>]().modify(|r, w| unsafe {
							match mode {
								PinMode::Output => w.bits(r.bits() | Self::MASK),
								PinMode::Input => w.bits(r.bits() & !Self::MASK),
							}
						});
					});
				}

				#[inline(always)]
				fn pin_direction(&self) -> PinMode {
					if Self::regs().[<ddr $p>]().read().bits() & Self::MASK != 0 {
						PinMode::Output
					} else {
						PinMode::Input
					}
				}

				#[inline(always)]
				fn toggle_pin_level(&mut self) {
					Self::regs().[<pin $p>]().write(|w| unsafe { w.bits(Self::MASK) });
				}

				#[inline(always)]
				fn set_pin_level(&mut self, level: Level) {
					avr_device::interrupt::free(|_| {
						Self::regs().[<port $p>]().modify(|r, w| unsafe {
							match level {
								Level::High => w.bits(r.bits() | Self::MASK),
								Level::Low => w.bits(r.bits() & !Self::MASK),
							}
						});
					});
				}

				#[inline(always)]
				fn pin_level(&self) -> Level {
					Level::from(Self::regs().[<port $p>]().read().bits() & Self::MASK != 0)
				}
			}
		}
	};
}

#[cfg(any(feature = "atmega328p", feature = "atmega2560"))]
impl_port_pins! {
	/// Pins of `PORTB`.
	///
	/// Digital pin 13, which carries the on-board LED, is `PB5` on the ATmega328P and `PB7` on
	/// the ATmega2560.
	pub struct Pins {
		PORTB(b) {
			pb0: PB0 = 0,
			pb1: PB1 = 1,
			pb2: PB2 = 2,
			pb3: PB3 = 3,
			pb4: PB4 = 4,
			pb5: PB5 = 5,
			pb6: PB6 = 6,
			pb7: PB7 = 7,
		}
	}
}

#[cfg(feature = "atmega32u4")]
impl_port_pins! {
	/// Pins of `PORTB` and the upper half of `PORTC`.
	///
	/// Digital pin 13, which carries the on-board LED, is `PC7` on the ATmega32U4.
	pub struct Pins {
		PORTB(b) {
			pb0: PB0 = 0,
			pb1: PB1 = 1,
			pb2: PB2 = 2,
			pb3: PB3 = 3,
			pb4: PB4 = 4,
			pb5: PB5 = 5,
			pb6: PB6 = 6,
			pb7: PB7 = 7,
		}
		PORTC(c) {
			pc6: PC6 = 6,
			pc7: PC7 = 7,
		}
	}
}
