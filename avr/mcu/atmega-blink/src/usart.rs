//! Transmit-only USART, for `ufmt` log output.
//!
//! Frames are 8N1.  The receiver is never enabled, so the RX pin stays free.
//!
//! # Example
//! ```no_run
//! # use atmega_blink::usart::Usart;
//! # use atmega_blink::clock::MHz16;
//! let dp = atmega_blink::Peripherals::take().unwrap();
//! let mut serial = Usart::<_, MHz16>::new(dp.USART0, 57600);
//! ufmt::uwriteln!(&mut serial, "Hello from Arduino!\r").ok();
//! ```

use core::convert::Infallible;
use core::marker::PhantomData;

use blink_generic::clock::Clock;

/// Register value for the baud rate `baud` at clock `CLOCK`, and whether double speed is needed.
///
/// Double speed (`U2X`) halves the sampling rate but gives finer baud resolution, so it is
/// preferred unless the divider would not fit the 12-bit `UBRR`.
pub const fn ubrr_for<CLOCK: Clock>(baud: u32) -> (u16, bool) {
	let ubrr = (CLOCK::FREQ / 4 / baud - 1) / 2;
	if ubrr > 4095 {
		(((CLOCK::FREQ / 8 / baud - 1) / 2) as u16, false)
	} else {
		(ubrr as u16, true)
	}
}

/// Access to one USART's registers.
pub trait UsartOps {
	fn raw_init(&mut self, ubrr: u16, u2x: bool);
	fn raw_write(&mut self, byte: u8);
	fn raw_flush(&mut self);
}

/// A USART transmitter running at a fixed baud rate.
pub struct Usart<USART, CLOCK> {
	usart: USART,
	_clock: PhantomData<CLOCK>,
}

impl<USART: UsartOps, CLOCK: Clock> Usart<USART, CLOCK> {
	pub fn new(mut usart: USART, baud: u32) -> Self {
		let (ubrr, u2x) = ubrr_for::<CLOCK>(baud);
		usart.raw_init(ubrr, u2x);
		Usart {
			usart,
			_clock: PhantomData,
		}
	}

	/// Block until the transmit buffer is free, then queue `byte`.
	pub fn write_byte(&mut self, byte: u8) {
		self.usart.raw_write(byte);
	}

	/// Block until everything queued has been shifted out.
	pub fn flush(&mut self) {
		self.usart.raw_flush();
	}
}

impl<USART: UsartOps, CLOCK: Clock> ufmt::uWrite for Usart<USART, CLOCK> {
	type Error = Infallible;

	fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
		for b in s.as_bytes() {
			self.write_byte(*b);
		}
		Ok(())
	}
}

// UCSRnA
const UDRE: u8 = 1 << 5;
const TXC: u8 = 1 << 6;
const U2X: u8 = 1 << 1;
// UCSRnB
const TXEN: u8 = 1 << 3;
// UCSRnC: asynchronous, no parity, one stop bit, eight data bits
const FRAME_8N1: u8 = 0b0000_0110;

macro_rules! impl_usart {
	($USART:ident, $n:literal) => {
		paste::paste! {
			impl UsartOps for crate::pac::$USART {
				fn raw_init(&mut self, ubrr: u16, u2x: bool) {
					unsafe {
						self.[<ubrr $n>]().write(|w| w.bits(ubrr));
						self.[<ucsr $n a>]().write(|w| w.bits(if u2x { U2X } else { 0 }));
						self.[<ucsr $n c>]().write(|w| w.bits(FRAME_8N1));
						self.[<ucsr $n b>]().write(|w| w.bits(TXEN));
					}
				}

				fn raw_write(&mut self, byte: u8) {
					while self.[<ucsr $n a>]().read().bits() & UDRE == 0 {}
					// Clear a stale transmit-complete flag (write one) so `raw_flush` waits
					// for this byte; keep U2X as configured.
					let u2x = self.[<ucsr $n a>]().read().bits() & U2X;
					unsafe {
						self.[<ucsr $n a>]().write(|w| w.bits(u2x | TXC));
						self.[<udr $n>]().write(|w| w.bits(byte));
					}
				}

				fn raw_flush(&mut self) {
					if self.[<ucsr $n b>]().read().bits() & TXEN == 0 {
						return;
					}
					while self.[<ucsr $n a>]().read().bits() & TXC == 0 {}
				}
			}
		}
	};
}

#[cfg(any(feature = "atmega328p", feature = "atmega2560"))]
impl_usart!(USART0, 0);
#[cfg(feature = "atmega32u4")]
impl_usart!(USART1, 1);

#[cfg(any(feature = "atmega328p", feature = "atmega2560"))]
pub type Usart0<CLOCK> = Usart<crate::pac::USART0, CLOCK>;
#[cfg(feature = "atmega32u4")]
pub type Usart1<CLOCK> = Usart<crate::pac::USART1, CLOCK>;
