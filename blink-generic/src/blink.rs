//! The blink loop
//!
//! Drives one output pin as a square wave with a 50% duty cycle: invert the level, spin for the
//! half-period, repeat forever.
//!
//! # Example
//! ```no_run
//! use blink_generic::clock::MHz16;
//! use blink_generic::delay::Delay;
//! use blink_generic::port::Pin;
//! use blink_generic::sim::{SimClock, SimPin, SimSpin};
//! use blink_generic::BlinkConfig;
//!
//! let clock = SimClock::new();
//! let led = Pin::new(SimPin::new(&clock));
//! let delay = Delay::<MHz16, _>::new(SimSpin::new(&clock));
//!
//! blink_generic::blink::run(led, delay, BlinkConfig::DEFAULT);
//! ```

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::StatefulOutputPin;
use unwrap_infallible::UnwrapInfallible;

use crate::port::{mode, Level, Pin, PinOps};

/// Build-time blink parameters.
#[derive(ufmt::derive::uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkConfig {
    /// Time between two toggles, in milliseconds.
    pub half_period_ms: u32,
}

impl BlinkConfig {
    pub const DEFAULT: BlinkConfig = BlinkConfig {
        half_period_ms: 500,
    };

    pub const fn with_half_period_ms(half_period_ms: u32) -> Self {
        BlinkConfig { half_period_ms }
    }

    /// Time between two rising edges, in milliseconds.
    pub const fn period_ms(&self) -> u32 {
        self.half_period_ms.saturating_mul(2)
    }
}

impl Default for BlinkConfig {
    fn default() -> Self {
        BlinkConfig::DEFAULT
    }
}

impl ufmt::uDisplay for BlinkConfig {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        ufmt::uwrite!(f, "{} ms", self.half_period_ms)
    }
}

/// An output pin and a delay, blinking.
pub struct Blinker<P, D> {
    led: P,
    delay: D,
    config: BlinkConfig,
    toggles: u32,
}

impl<P, D> Blinker<P, D>
where
    P: StatefulOutputPin<Error = Infallible>,
    D: DelayNs,
{
    /// `led` must already be configured as an output.
    pub fn new(led: P, delay: D, config: BlinkConfig) -> Self {
        Blinker {
            led,
            delay,
            config,
            toggles: 0,
        }
    }

    /// One iteration: invert the level, then block for the half-period.
    ///
    /// Returns the level the pin is driving during the wait.
    pub fn step(&mut self) -> Level {
        self.led.toggle().unwrap_infallible();
        let level = Level::from(self.led.is_set_high().unwrap_infallible());
        self.toggles = self.toggles.wrapping_add(1);
        self.delay.delay_ms(self.config.half_period_ms);
        level
    }

    /// Blink forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Number of completed iterations (wraps after `u32::MAX`).
    pub fn toggles(&self) -> u32 {
        self.toggles
    }

    /// Give back the pin and the delay.
    pub fn release(self) -> (P, D) {
        (self.led, self.delay)
    }
}

/// Configure `pin` as output and blink it forever.
pub fn run<MODE, PIN, D>(pin: Pin<MODE, PIN>, delay: D, config: BlinkConfig) -> !
where
    MODE: mode::Io,
    PIN: PinOps,
    D: DelayNs,
{
    Blinker::new(pin.into_output(), delay, config).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MHz16;
    use crate::delay::Delay;
    use crate::port::PinMode;
    use crate::sim::{SimClock, SimPin, SimSpin};
    use alloc::vec::Vec;

    struct Log(Vec<u8>);

    impl ufmt::uWrite for Log {
        type Error = Infallible;

        fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
            self.0.extend_from_slice(s.as_bytes());
            Ok(())
        }
    }

    fn blinker(
        clock: &SimClock,
        config: BlinkConfig,
    ) -> Blinker<Pin<mode::Output, SimPin>, Delay<MHz16, SimSpin>> {
        let led = Pin::new(SimPin::new(clock)).into_output();
        Blinker::new(led, Delay::new(SimSpin::new(clock)), config)
    }

    #[test]
    fn default_half_period() {
        assert_eq!(BlinkConfig::DEFAULT.half_period_ms, 500);
        assert_eq!(BlinkConfig::DEFAULT.period_ms(), 1000);
        assert_eq!(BlinkConfig::default(), BlinkConfig::DEFAULT);
    }

    #[test]
    fn step_alternates() {
        let clock = SimClock::new();
        let mut blinker = blinker(&clock, BlinkConfig::DEFAULT);

        assert_eq!(blinker.step(), Level::High);
        assert_eq!(blinker.step(), Level::Low);
        assert_eq!(blinker.step(), Level::High);
        assert_eq!(blinker.toggles(), 3);
    }

    #[test]
    fn step_waits_half_period() {
        let clock = SimClock::new();
        let mut blinker = blinker(&clock, BlinkConfig::with_half_period_ms(100));

        blinker.step();
        assert_eq!(clock.now(), 100 * 16_000);
        blinker.step();
        assert_eq!(clock.now(), 200 * 16_000);
    }

    #[test]
    fn toggle_happens_before_wait() {
        let clock = SimClock::new();
        let mut blinker = blinker(&clock, BlinkConfig::DEFAULT);
        blinker.step();

        let (led, _) = blinker.release();
        let edges = led.inner().waveform().edges().to_vec();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].at, 0);
        assert_eq!(edges[0].level, Level::High);
        assert_eq!(led.direction(), PinMode::Output);
    }

    #[test]
    fn display_half_period() {
        let mut log = Log(Vec::new());
        ufmt::uwrite!(&mut log, "every {}", BlinkConfig::DEFAULT).unwrap_infallible();
        assert_eq!(log.0, b"every 500 ms");

        let mut log = Log(Vec::new());
        ufmt::uwrite!(&mut log, "{}", BlinkConfig::with_half_period_ms(125)).unwrap_infallible();
        assert_eq!(log.0, b"125 ms");
    }
}
