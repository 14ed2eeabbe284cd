//! Busy-wait delays
//!
//! [`Delay`] turns durations into CPU cycles using the compile-time [`Clock`] speed and hands
//! them to a [`CycleSpin`], which burns them.  On AVR the spinner is a calibrated `sbiw`/`brne`
//! loop; on the host it is a virtual clock (see [`crate::sim`]).
//!
//! Nothing here yields: the calling thread is occupied for the whole duration and returns after
//! *at least* the requested time has passed.

use core::marker::PhantomData;

use crate::clock::Clock;

/// Burns CPU cycles.
pub trait CycleSpin {
    /// Spin for at least `cycles` CPU cycles.
    fn spin_cycles(&mut self, cycles: u32);
}

impl<S: CycleSpin + ?Sized> CycleSpin for &mut S {
    fn spin_cycles(&mut self, cycles: u32) {
        (**self).spin_cycles(cycles)
    }
}

/// Delay type for `embedded-hal` compatibility.
///
/// This type can be used to pass a generic delay utility to `embedded-hal` drivers.  For direct
/// use in firmware, [`Delay::block_for`] reads more naturally.
pub struct Delay<SPEED, S> {
    spin: S,
    _speed: PhantomData<SPEED>,
}

impl<SPEED: Clock, S: CycleSpin> Delay<SPEED, S> {
    /// Create a new delay object
    pub fn new(spin: S) -> Self {
        Delay {
            spin,
            _speed: PhantomData,
        }
    }

    /// Block the calling thread for at least `ms` milliseconds.
    pub fn block_for(&mut self, ms: u32) {
        self.spin_total(u64::from(ms) * u64::from(SPEED::cycles_per_ms()));
    }

    /// Borrow the underlying cycle spinner.
    pub fn spinner(&self) -> &S {
        &self.spin
    }

    /// Give back the underlying cycle spinner.
    pub fn release(self) -> S {
        self.spin
    }

    fn spin_total(&mut self, mut cycles: u64) {
        while cycles > 0 {
            let chunk = cycles.min(u64::from(u32::MAX)) as u32;
            self.spin.spin_cycles(chunk);
            cycles -= u64::from(chunk);
        }
    }
}

impl<SPEED, S: Clone> Clone for Delay<SPEED, S> {
    fn clone(&self) -> Self {
        Delay {
            spin: self.spin.clone(),
            _speed: PhantomData,
        }
    }
}

/// Cycles needed to cover `ns` nanoseconds at `freq` Hz, rounded up.
pub(crate) fn cycles_for_ns(freq: u32, ns: u32) -> u64 {
    (u64::from(ns) * u64::from(freq)).div_ceil(1_000_000_000)
}

impl<SPEED: Clock, S: CycleSpin> embedded_hal::delay::DelayNs for Delay<SPEED, S> {
    fn delay_ns(&mut self, ns: u32) {
        self.spin_total(cycles_for_ns(SPEED::FREQ, ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.spin_total(u64::from(us) * u64::from(SPEED::cycles_per_us()));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.block_for(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{MHz1, MHz16};
    use alloc::vec::Vec;
    use embedded_hal::delay::DelayNs;

    #[derive(Default)]
    struct CountingSpin {
        calls: Vec<u32>,
    }

    impl CycleSpin for CountingSpin {
        fn spin_cycles(&mut self, cycles: u32) {
            self.calls.push(cycles);
        }
    }

    impl CountingSpin {
        fn total(&self) -> u64 {
            self.calls.iter().map(|&c| u64::from(c)).sum()
        }
    }

    #[test]
    fn half_second_at_16mhz() {
        let mut delay = Delay::<MHz16, _>::new(CountingSpin::default());
        delay.block_for(500);
        assert_eq!(delay.spinner().total(), 8_000_000);
    }

    #[test]
    fn zero_duration_does_not_spin() {
        let mut delay = Delay::<MHz16, _>::new(CountingSpin::default());
        delay.delay_ms(0);
        delay.delay_us(0);
        delay.delay_ns(0);
        assert!(delay.spinner().calls.is_empty());
    }

    #[test]
    fn nanoseconds_round_up() {
        // One cycle at 1 MHz is 1000 ns; anything shorter still costs a cycle.
        let mut delay = Delay::<MHz1, _>::new(CountingSpin::default());
        delay.delay_ns(1);
        assert_eq!(delay.spinner().total(), 1);

        let mut delay = Delay::<MHz16, _>::new(CountingSpin::default());
        delay.delay_ns(1_000);
        assert_eq!(delay.spinner().total(), 16);
    }

    #[test]
    fn long_delays_are_chunked() {
        let mut delay = Delay::<MHz16, _>::new(CountingSpin::default());
        delay.block_for(u32::MAX);
        let spin = delay.release();
        assert_eq!(spin.total(), u64::from(u32::MAX) * 16_000);
        assert!(spin.calls.len() > 1);
        assert!(spin.calls.iter().all(|&c| c > 0));
    }

    #[test]
    fn microseconds() {
        let mut delay = Delay::<MHz16, _>::new(CountingSpin::default());
        delay.delay_us(250);
        assert_eq!(delay.spinner().total(), 4_000);
    }
}
