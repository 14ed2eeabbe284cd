//! Host-side simulation
//!
//! A [`SimClock`] counts virtual CPU cycles.  [`SimSpin`] advances it instead of burning real
//! time, and [`SimPin`] models one pin's direction and output bits, stamping every level change
//! with the current cycle count.  Together they let the blink loop run on the host at full speed
//! while producing the exact waveform the hardware would.
//!
//! [`crate::blink::run`] never returns.  To observe it, give the spinner a cycle budget: once the
//! budget is reached the spinner panics with [`SIMULATION_BUDGET_EXHAUSTED`], and a test can catch
//! the unwind and inspect the recorded [`Waveform`].

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::clock::Clock;
use crate::delay::CycleSpin;
use crate::port::{Level, PinMode, PinOps};

/// Panic message of a [`SimSpin`] that ran out of budget.
pub const SIMULATION_BUDGET_EXHAUSTED: &str = "simulation cycle budget exhausted";

/// Convert milliseconds to cycles at the clock speed `SPEED`.
pub fn ms_to_cycles<SPEED: Clock>(ms: u64) -> u64 {
    ms * u64::from(SPEED::cycles_per_ms())
}

/// Convert cycles to whole milliseconds at the clock speed `SPEED`, rounding down.
pub fn cycles_to_ms<SPEED: Clock>(cycles: u64) -> u64 {
    cycles / u64::from(SPEED::cycles_per_ms())
}

/// Virtual cycle counter, shared by every simulated part.
#[derive(Clone, Default)]
pub struct SimClock {
    cycles: Rc<Cell<u64>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycles elapsed since the simulation started.
    pub fn now(&self) -> u64 {
        self.cycles.get()
    }

    pub fn advance(&self, cycles: u64) {
        self.cycles.set(self.cycles.get() + cycles);
    }

    fn set(&self, cycles: u64) {
        self.cycles.set(cycles);
    }
}

/// A cycle spinner that moves the [`SimClock`] forward.
#[derive(Clone)]
pub struct SimSpin {
    clock: SimClock,
    budget: Option<u64>,
}

impl SimSpin {
    /// A spinner that never runs out.
    pub fn new(clock: &SimClock) -> Self {
        SimSpin {
            clock: clock.clone(),
            budget: None,
        }
    }

    /// A spinner that panics once the clock reaches `budget` cycles.
    ///
    /// The clock is left at exactly `budget`, so the budget marks the end of the observation
    /// window `[0, budget)`.
    pub fn with_budget(clock: &SimClock, budget: u64) -> Self {
        SimSpin {
            clock: clock.clone(),
            budget: Some(budget),
        }
    }
}

impl CycleSpin for SimSpin {
    fn spin_cycles(&mut self, cycles: u32) {
        let target = self.clock.now() + u64::from(cycles);
        match self.budget {
            Some(budget) if target >= budget => {
                self.clock.set(budget);
                panic!("{}", SIMULATION_BUDGET_EXHAUSTED);
            }
            _ => self.clock.set(target),
        }
    }
}

/// A recorded level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Cycle at which the pin started driving `level`.
    pub at: u64,
    pub level: Level,
}

impl Edge {
    pub fn is_rising(&self) -> bool {
        self.level.is_high()
    }
}

struct PinState {
    direction: PinMode,
    latch: Level,
    initial: Level,
    configured_at: Option<u64>,
    edges: Vec<Edge>,
}

/// Simulated pin: one direction bit and one output latch.
///
/// Level changes are only recorded while the pin is an output; an input does not drive the line.
pub struct SimPin {
    clock: SimClock,
    state: Rc<RefCell<PinState>>,
}

impl SimPin {
    /// A pin in its reset state: input, latch LOW.
    pub fn new(clock: &SimClock) -> Self {
        Self::with_level(clock, Level::Low)
    }

    /// A pin whose latch powers up at `level`.
    pub fn with_level(clock: &SimClock, level: Level) -> Self {
        SimPin {
            clock: clock.clone(),
            state: Rc::new(RefCell::new(PinState {
                direction: PinMode::Input,
                latch: level,
                initial: level,
                configured_at: None,
                edges: Vec::new(),
            })),
        }
    }

    /// A handle for observing this pin after it has been moved into firmware code.
    pub fn probe(&self) -> Probe {
        Probe {
            clock: self.clock.clone(),
            state: self.state.clone(),
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.probe().waveform()
    }

    fn drive(&mut self, level: Level) {
        let mut state = self.state.borrow_mut();
        if state.latch == level {
            return;
        }
        state.latch = level;
        if state.direction == PinMode::Output {
            let at = self.clock.now();
            state.edges.push(Edge { at, level });
        }
    }
}

impl PinOps for SimPin {
    fn set_pin_direction(&mut self, mode: PinMode) {
        let mut state = self.state.borrow_mut();
        if mode == PinMode::Output && state.configured_at.is_none() {
            state.configured_at = Some(self.clock.now());
        }
        state.direction = mode;
    }

    fn pin_direction(&self) -> PinMode {
        self.state.borrow().direction
    }

    fn toggle_pin_level(&mut self) {
        let next = !self.pin_level();
        self.drive(next);
    }

    fn set_pin_level(&mut self, level: Level) {
        self.drive(level);
    }

    fn pin_level(&self) -> Level {
        self.state.borrow().latch
    }
}

/// Read-only view of a [`SimPin`].
#[derive(Clone)]
pub struct Probe {
    clock: SimClock,
    state: Rc<RefCell<PinState>>,
}

impl Probe {
    pub fn direction(&self) -> PinMode {
        self.state.borrow().direction
    }

    pub fn level(&self) -> Level {
        self.state.borrow().latch
    }

    /// Cycle at which the pin first became an output.
    pub fn configured_at(&self) -> Option<u64> {
        self.state.borrow().configured_at
    }

    /// Everything recorded so far, up to the current clock.
    pub fn waveform(&self) -> Waveform {
        let state = self.state.borrow();
        Waveform {
            initial: state.initial,
            edges: state.edges.clone(),
            end: self.clock.now(),
        }
    }
}

/// A recorded signal over the window `[0, end)`.
#[derive(Debug, Clone)]
pub struct Waveform {
    initial: Level,
    edges: Vec<Edge>,
    end: u64,
}

impl Waveform {
    /// Level before the first edge.
    pub fn initial(&self) -> Level {
        self.initial
    }

    /// End of the observation window, in cycles.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Edges inside the observation window.
    pub fn edges(&self) -> &[Edge] {
        let inside = self.edges.partition_point(|e| e.at < self.end);
        &self.edges[..inside]
    }

    pub fn rising_edges(&self) -> impl Iterator<Item = u64> + '_ {
        self.edges().iter().filter(|e| e.is_rising()).map(|e| e.at)
    }

    pub fn falling_edges(&self) -> impl Iterator<Item = u64> + '_ {
        self.edges().iter().filter(|e| !e.is_rising()).map(|e| e.at)
    }

    /// Level driven at cycle `at`.  An edge at `at` counts as already happened.
    pub fn level_at(&self, at: u64) -> Level {
        let before = self.edges.partition_point(|e| e.at <= at);
        match before {
            0 => self.initial,
            n => self.edges[n - 1].level,
        }
    }

    /// Cycles spent high within `[from, to)`.
    pub fn high_cycles(&self, from: u64, to: u64) -> u64 {
        let mut high = 0;
        let mut cursor = from;
        let mut level = self.level_at(from);
        for edge in self.edges().iter().filter(|e| e.at > from && e.at < to) {
            if level.is_high() {
                high += edge.at - cursor;
            }
            cursor = edge.at;
            level = edge.level;
        }
        if level.is_high() {
            high += to - cursor;
        }
        high
    }

    /// Fraction of `[0, end)` spent high.
    pub fn duty_cycle(&self) -> f64 {
        if self.end == 0 {
            return 0.0;
        }
        self.high_cycles(0, self.end) as f64 / self.end as f64
    }

    /// Distances between consecutive edges of the same direction.
    pub fn periods(&self, rising: bool) -> Vec<u64> {
        let at: Vec<u64> = if rising {
            self.rising_edges().collect()
        } else {
            self.falling_edges().collect()
        };
        at.windows(2).map(|w| w[1] - w[0]).collect()
    }
}
