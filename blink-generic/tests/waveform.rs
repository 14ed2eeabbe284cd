//! Waveform produced by the blink loop, observed through the simulator.

use std::panic::{self, AssertUnwindSafe};

use blink_generic::blink::{self, BlinkConfig, Blinker};
use blink_generic::clock::{Clock, MHz16, MHz8};
use blink_generic::delay::Delay;
use blink_generic::port::{Level, Pin, PinMode};
use blink_generic::sim::{
    cycles_to_ms, ms_to_cycles, Probe, SimClock, SimPin, SimSpin, SIMULATION_BUDGET_EXHAUSTED,
};

/// Run the never-returning blink loop until `window_ms` of virtual time have passed.
fn run_for<SPEED: Clock>(window_ms: u64, initial: Level, config: BlinkConfig) -> Probe {
    let clock = SimClock::new();
    let sim = SimPin::with_level(&clock, initial);
    let probe = sim.probe();
    let budget = ms_to_cycles::<SPEED>(window_ms);
    let delay = Delay::<SPEED, _>::new(SimSpin::with_budget(&clock, budget));

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        blink::run(Pin::new(sim), delay, config);
    }));

    let payload = result.expect_err("blink loop returned");
    assert_eq!(
        payload.downcast_ref::<String>().map(String::as_str),
        Some(SIMULATION_BUDGET_EXHAUSTED),
    );
    assert_eq!(clock.now(), budget);
    probe
}

#[test]
fn two_second_scenario() {
    let probe = run_for::<MHz16>(2000, Level::Low, BlinkConfig::DEFAULT);
    let waveform = probe.waveform();

    let edges: Vec<(u64, Level)> = waveform
        .edges()
        .iter()
        .map(|e| (cycles_to_ms::<MHz16>(e.at), e.level))
        .collect();
    assert_eq!(
        edges,
        vec![
            (0, Level::High),
            (500, Level::Low),
            (1000, Level::High),
            (1500, Level::Low),
        ]
    );
}

#[test]
fn scenario_starting_high() {
    let probe = run_for::<MHz16>(2000, Level::High, BlinkConfig::DEFAULT);
    let waveform = probe.waveform();

    assert_eq!(waveform.initial(), Level::High);
    let levels: Vec<Level> = waveform.edges().iter().map(|e| e.level).collect();
    assert_eq!(
        levels,
        vec![Level::Low, Level::High, Level::Low, Level::High]
    );
}

#[test]
fn levels_alternate_every_half_period() {
    let probe = run_for::<MHz16>(20_000, Level::Low, BlinkConfig::DEFAULT);
    let waveform = probe.waveform();

    // Sample in the middle of every half-period.
    let samples: Vec<Level> = (0..40)
        .map(|n| waveform.level_at(ms_to_cycles::<MHz16>(n * 500 + 250)))
        .collect();
    for pair in samples.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }

    for pair in waveform.edges().windows(2) {
        assert_eq!(pair[1].level, !pair[0].level);
    }
}

#[test]
fn period_is_one_second() {
    let probe = run_for::<MHz16>(10_000, Level::Low, BlinkConfig::DEFAULT);
    let waveform = probe.waveform();
    let second = ms_to_cycles::<MHz16>(1000);

    let rising = waveform.periods(true);
    let falling = waveform.periods(false);
    assert_eq!(rising.len(), 9);
    assert_eq!(falling.len(), 9);
    assert!(rising.iter().all(|&p| p == second));
    assert!(falling.iter().all(|&p| p == second));
}

#[test]
fn period_follows_clock_speed() {
    let probe = run_for::<MHz8>(4_000, Level::Low, BlinkConfig::DEFAULT);
    let waveform = probe.waveform();

    assert_eq!(waveform.edges().len(), 8);
    assert!(waveform
        .periods(true)
        .iter()
        .all(|&p| p == ms_to_cycles::<MHz8>(1000)));
}

#[test]
fn period_follows_config() {
    let config = BlinkConfig::with_half_period_ms(125);
    let probe = run_for::<MHz16>(1_000, Level::Low, config);
    let waveform = probe.waveform();

    assert_eq!(waveform.edges().len(), 8);
    assert!(waveform
        .periods(false)
        .iter()
        .all(|&p| p == ms_to_cycles::<MHz16>(u64::from(config.period_ms()))));
}

#[test]
fn duty_cycle_is_half() {
    let probe = run_for::<MHz16>(60_000, Level::Low, BlinkConfig::DEFAULT);
    let duty = probe.waveform().duty_cycle();
    assert!((duty - 0.5).abs() < 0.001, "duty cycle {}", duty);
}

#[test]
fn configured_as_output_before_first_toggle() {
    let probe = run_for::<MHz16>(2000, Level::Low, BlinkConfig::DEFAULT);
    let waveform = probe.waveform();

    assert_eq!(probe.direction(), PinMode::Output);
    let configured_at = probe.configured_at().expect("pin never became an output");
    assert!(configured_at <= waveform.edges()[0].at);
}

#[test]
fn output_before_any_step() {
    let clock = SimClock::new();
    let sim = SimPin::new(&clock);
    let probe = sim.probe();
    assert_eq!(probe.direction(), PinMode::Input);

    let led = Pin::new(sim).into_output();
    let _blinker = Blinker::new(
        led,
        Delay::<MHz16, _>::new(SimSpin::new(&clock)),
        BlinkConfig::DEFAULT,
    );

    assert_eq!(probe.direction(), PinMode::Output);
    assert_eq!(probe.level(), Level::Low);
    assert!(probe.waveform().edges().is_empty());
}

#[test]
fn still_toggling_after_ten_thousand_iterations() {
    let probe = run_for::<MHz16>(10_000 * 500, Level::Low, BlinkConfig::DEFAULT);
    let waveform = probe.waveform();

    assert_eq!(waveform.edges().len(), 10_000);
    let last = waveform.edges()[9_999];
    assert_eq!(cycles_to_ms::<MHz16>(last.at), 9_999 * 500);
    assert_eq!(last.level, Level::Low);
}

#[test]
fn blinker_counts_steps() {
    let clock = SimClock::new();
    let sim = SimPin::new(&clock);
    let probe = sim.probe();
    let mut blinker = Blinker::new(
        Pin::new(sim).into_output(),
        Delay::<MHz16, _>::new(SimSpin::new(&clock)),
        BlinkConfig::DEFAULT,
    );

    for n in 0..10_000u32 {
        let expected = if n % 2 == 0 { Level::High } else { Level::Low };
        assert_eq!(blinker.step(), expected);
    }
    assert_eq!(blinker.toggles(), 10_000);
    assert_eq!(blinker.step(), Level::High);
    assert_eq!(probe.waveform().edges().len(), 10_001);
}
