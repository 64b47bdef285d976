use std::time::{Duration, Instant};

use approx::assert_abs_diff_eq;
use embedded_graphics::prelude::*;
use sea_tuner::render::palette;
use sea_tuner::{
    Canvas, Error, InputEvent, InputSource, Key, LoopDriver, Pacing, ScriptedInput, Status,
    TunerConfig,
};

type Driver<'a> = LoopDriver<Canvas, &'a mut ScriptedInput>;

fn offline_config() -> TunerConfig {
    TunerConfig::default()
        .with_canvas(256, 192)
        .with_pacing(Pacing::Unthrottled)
}

fn driver<'a>(config: &TunerConfig, input: &'a mut ScriptedInput) -> Driver<'a> {
    let canvas = Canvas::new(config.canvas).unwrap();
    LoopDriver::new(config, canvas, input).unwrap()
}

/// Stays quiet for `polls` frames, then asks to quit.
struct QuitAfter {
    polls: u32,
}

impl InputSource for QuitAfter {
    fn poll_events(&mut self, events: &mut Vec<InputEvent>) {
        if self.polls == 0 {
            events.push(InputEvent::Quit);
            return;
        }
        self.polls -= 1;
    }
}

fn step(driver: &mut Driver<'_>) -> Status {
    match driver.step() {
        Ok(status) => status,
        Err(never) => match never {},
    }
}

// A quarter period at the defaults (100 frames of 10 s at 40 Hz) puts the
// sine at its peak: 45° on channel 0 and 75° on channel 1.
#[test]
fn quarter_period_reaches_peak() {
    let config = offline_config();
    let mut input = ScriptedInput::new();
    let mut driver = driver(&config, &mut input);

    for _ in 0..100 {
        assert_eq!(step(&mut driver), Status::Running);
    }

    let (out0, out1) = driver.outputs();
    assert_abs_diff_eq!(driver.state().phase(), core::f64::consts::FRAC_PI_2, epsilon = 1e-9);
    assert_abs_diff_eq!(out0, 45f64.to_radians(), epsilon = 1e-9);
    assert_abs_diff_eq!(out1, 75f64.to_radians(), epsilon = 1e-9);
    assert_eq!(driver.frames(), 100);
    assert_eq!(driver.surface().presented(), 100);
}

// Both histories get the frame's outputs, newest last.
#[test]
fn histories_track_outputs() {
    let config = offline_config();
    let mut input = ScriptedInput::new();
    let mut driver = driver(&config, &mut input);

    for _ in 0..10 {
        step(&mut driver);
    }

    let (out0, out1) = driver.outputs();
    let (history0, history1) = driver.history();
    assert_eq!(history0.len(), config.history_capacity());
    assert_eq!(history1.len(), config.history_capacity());
    assert_eq!(history0.latest(), Some(out0));
    assert_eq!(history1.latest(), Some(out1));
    for (a, b) in history0.iter().zip(history1.iter()).skip(config.history_capacity() - 10) {
        assert_abs_diff_eq!(b - a, config.offset, epsilon = 1e-12);
    }
}

// Keys pressed between frames take effect in the next frame.
#[test]
fn key_presses_tune_running_loop() {
    let config = offline_config();
    let mut input = ScriptedInput::new();
    input.press(Key::PageUp);
    input.press(Key::Plus);
    input.press(Key::Up);
    input.press(Key::Left);

    let mut driver = driver(&config, &mut input);
    step(&mut driver);

    let state = *driver.state();
    assert_abs_diff_eq!(state.amplitude, 65f64.to_radians(), epsilon = 1e-12);
    assert_abs_diff_eq!(state.offset, 40f64.to_radians(), epsilon = 1e-12);
    assert_abs_diff_eq!(state.period, 9.0, epsilon = 1e-12);
    assert_abs_diff_eq!(state.out1() - state.out0(), state.offset, epsilon = 1e-12);
}

// After a quit, stepping again changes nothing and draws nothing.
#[test]
fn terminated_loop_is_inert() {
    let config = offline_config();
    let canvas = Canvas::new(config.canvas).unwrap();
    let mut driver = LoopDriver::new(&config, canvas, QuitAfter { polls: 5 }).unwrap();

    let mut frames = 0;
    while driver.step().unwrap() == Status::Running {
        frames += 1;
    }
    assert_eq!(frames, 5);
    assert_eq!(driver.surface().presented(), 5);

    let state = *driver.state();
    let (history0, history1) = (driver.history().0.snapshot(), driver.history().1.snapshot());

    for _ in 0..3 {
        assert_eq!(driver.step().unwrap(), Status::Terminated);
    }
    assert_eq!(*driver.state(), state);
    assert_eq!(driver.history().0.snapshot(), history0);
    assert_eq!(driver.history().1.snapshot(), history1);
    assert_eq!(driver.surface().presented(), 5);
    assert_eq!(driver.frames(), 6);
}

// `run_frames` stops early when the operator quits.
#[test]
fn run_frames_stops_on_terminate() {
    let config = offline_config();
    let mut input = ScriptedInput::from_iter([InputEvent::Key(Key::Escape)]);
    let mut driver = driver(&config, &mut input);

    let status = match driver.run_frames(50) {
        Ok(status) => status,
        Err(never) => match never {},
    };
    assert_eq!(status, Status::Terminated);
    assert_eq!(driver.frames(), 1);
    assert_eq!(driver.surface().presented(), 0);
}

// A frame shows the background, both traces and the legend.
#[test]
fn presented_frame_has_plot() {
    let config = TunerConfig::default().with_pacing(Pacing::Unthrottled);
    let mut input = ScriptedInput::new();
    let mut driver = driver(&config, &mut input);
    step(&mut driver);

    let canvas = driver.surface();
    assert_eq!(canvas.pixel(Point::new(1020, 2)), Some(palette::BACKGROUND));
    // old samples are still zero on channel 0; channel 1 was zero too and is drawn on top
    assert_eq!(canvas.pixel(Point::new(100, 576)), Some(palette::CHANNEL1));
    assert!(canvas.frame().iter().any(|&c| c == palette::LEGEND));
    assert!(canvas.frame().iter().any(|&c| c == palette::CHANNEL0));
}

// Realtime pacing holds each frame to at least 1/frame_rate.
#[test]
fn realtime_pacing_bounds_frame_rate() {
    let config = TunerConfig::default()
        .with_canvas(64, 48)
        .with_frame_rate(40.0)
        .with_pacing(Pacing::Realtime);
    let mut input = ScriptedInput::new();
    let mut driver = driver(&config, &mut input);

    let start = Instant::now();
    for _ in 0..3 {
        step(&mut driver);
    }
    assert!(start.elapsed() >= Duration::from_millis(75));
}

// Bad configuration and unusable canvases are rejected before the loop starts.
#[test]
fn startup_failures_are_fatal() {
    let canvas = Canvas::new(Size::new(64, 48)).unwrap();
    let config = offline_config().with_frame_rate(0.0);
    match LoopDriver::new(&config, canvas, ScriptedInput::new()) {
        Err(Error::Config(e)) => assert_eq!(e.field, "frame_rate"),
        _ => panic!("zero frame rate should be rejected"),
    }

    let canvas = Canvas::new(Size::new(64, 48)).unwrap();
    let config = offline_config().with_period(-1.0);
    assert!(LoopDriver::new(&config, canvas, ScriptedInput::new()).is_err());

    let canvas = Canvas::new(Size::new(64, 48)).unwrap();
    let config = offline_config().with_period(1e300);
    match LoopDriver::new(&config, canvas, ScriptedInput::new()) {
        Err(Error::Config(e)) => assert_eq!(e.field, "lookback"),
        _ => panic!("an unallocatable history window should be rejected"),
    }

    assert!(Canvas::new(Size::new(1, 48)).is_err());
    assert!(Canvas::new(Size::new(64, 0)).is_err());
}

// Teardown hands back the final tuning.
#[test]
fn finish_returns_final_state() {
    let config = offline_config();
    let mut input = ScriptedInput::new();
    input.press(Key::RightBracket);
    let mut driver = driver(&config, &mut input);
    step(&mut driver);

    let state = driver.finish();
    assert_abs_diff_eq!(state.period, 11.0, epsilon = 1e-12);
}
