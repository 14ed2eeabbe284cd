//! Busy-wait delays calibrated to the CPU clock.
//!
//! The spin loop is a `sbiw`/`brne` pair: two cycles to decrement the 16-bit counter and two
//! cycles for the taken branch, so every iteration costs four cycles.

use blink_generic::delay::CycleSpin;

/// Cycles burnt by one iteration of [`busy_loop`].
const CYCLES_PER_ITERATION: u32 = 4;

/// Spins the CPU.  This is the [`CycleSpin`] for real hardware.
#[derive(Clone, Copy, Default)]
pub struct AvrSpin;

impl CycleSpin for AvrSpin {
	fn spin_cycles(&mut self, cycles: u32) {
		let mut iterations = cycles.div_ceil(CYCLES_PER_ITERATION);
		while iterations > 0 {
			let chunk = iterations.min(u32::from(u16::MAX)) as u16;
			busy_loop(chunk);
			iterations -= u32::from(chunk);
		}
	}
}

/// Busy-wait delay for real hardware, clocked at `SPEED`.
pub type Delay<SPEED> = blink_generic::delay::Delay<SPEED, AvrSpin>;

/// `c` must not be zero: the loop decrements before testing.
#[cfg(target_arch = "avr")]
#[inline(always)]
fn busy_loop(c: u16) {
	unsafe {
		core::arch::asm!(
			"1:",
			"sbiw {c}, 1",
			"brne 1b",
			c = inout(reg_iw) c => _,
			options(nomem, nostack),
		);
	}
}

#[cfg(not(target_arch = "avr"))]
fn busy_loop(_c: u16) {
	unimplemented!("Implementation is only available for avr targets!")
}
