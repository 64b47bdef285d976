//! Fixed-rate loop tying generator, history, controller and renderer together.

use std::thread::sleep;
use std::time::{Duration, Instant};

use tracing::{info, trace, warn};

use crate::config::{Pacing, TunerConfig};
use crate::controller::{Flow, InteractionController};
use crate::error::Error;
use crate::generator::SignalGenerator;
use crate::history::HistoryBuffer;
use crate::input::InputSource;
use crate::render::Renderer;
use crate::surface::{DrawError, Surface};
use crate::waveform::WaveformState;

/// Where the loop is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Terminated,
}

/// Bounds a loop to a fixed frame rate.
#[derive(Clone, Copy, Debug)]
pub struct FramePacer {
    interval: Duration,
    pacing: Pacing,
}

impl FramePacer {
    pub fn new(frame_rate: f64, pacing: Pacing) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / frame_rate),
            pacing,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep until one interval has passed since `frame_start`.
    ///
    /// Returns how far the frame overran its budget, if it did.
    pub fn wait(&self, frame_start: Instant) -> Option<Duration> {
        if self.pacing == Pacing::Unthrottled {
            return None;
        }
        let elapsed = frame_start.elapsed();
        match self.interval.checked_sub(elapsed) {
            Some(remaining) => {
                sleep(remaining);
                None
            }
            None => Some(elapsed - self.interval),
        }
    }
}

/// Owns the whole tuner and advances it one frame per [`step`](Self::step).
///
/// Once terminated, further steps do nothing: no state change, no drawing
/// and no sleeping.
pub struct LoopDriver<S, I> {
    state: WaveformState,
    generator: SignalGenerator,
    history0: HistoryBuffer,
    history1: HistoryBuffer,
    controller: InteractionController,
    renderer: Renderer,
    surface: S,
    input: I,
    pacer: FramePacer,
    status: Status,
    frames: u64,
}

impl<S: Surface, I: InputSource> LoopDriver<S, I> {
    pub fn new(config: &TunerConfig, surface: S, input: I) -> Result<Self, Error> {
        Self::with_controller(config, InteractionController::new(config.steps), surface, input)
    }

    /// Like [`new`](Self::new) with custom key bindings. The on-screen legend
    /// follows the controller's key map.
    pub fn with_controller(
        config: &TunerConfig,
        controller: InteractionController,
        surface: S,
        input: I,
    ) -> Result<Self, Error> {
        config.validate()?;

        let capacity = config.history_capacity();
        info!(
            amplitude_deg = config.amplitude.to_degrees(),
            period_s = config.period,
            offset_deg = config.offset.to_degrees(),
            frame_rate = config.frame_rate,
            history = capacity,
            "starting tuner"
        );

        Ok(Self {
            state: WaveformState::from_config(config),
            generator: SignalGenerator::new(config.sample_period()),
            history0: HistoryBuffer::new(capacity),
            history1: HistoryBuffer::new(capacity),
            renderer: Renderer::new(config.reference_period(), controller.keymap().legend()),
            controller,
            surface,
            input,
            pacer: FramePacer::new(config.frame_rate, config.pacing),
            status: Status::Running,
            frames: 0,
        })
    }

    /// Run one frame: advance, record, poll input, draw, then wait out the
    /// rest of the frame.
    ///
    /// The frame in which termination is requested is not drawn.
    pub fn step(&mut self) -> Result<Status, DrawError<S>> {
        if self.status == Status::Terminated {
            return Ok(Status::Terminated);
        }
        let frame_start = Instant::now();

        self.generator.advance(&mut self.state);
        self.history0.push(self.state.out0());
        self.history1.push(self.state.out1());
        trace!(frame = self.frames, out0 = self.state.out0(), out1 = self.state.out1());

        if self.controller.poll(&mut self.state, &mut self.input) == Flow::Terminate {
            self.status = Status::Terminated;
            self.frames += 1;
            info!(frames = self.frames, "terminate requested");
            return Ok(Status::Terminated);
        }

        self.renderer
            .draw(&self.state, &self.history0, &self.history1, self.surface.target())?;
        self.surface.present();
        self.frames += 1;

        if let Some(overrun) = self.pacer.wait(frame_start) {
            warn!(frame = self.frames, ?overrun, "frame over budget");
        }
        Ok(Status::Running)
    }

    /// Step until terminated.
    pub fn run(&mut self) -> Result<(), DrawError<S>> {
        while self.step()? == Status::Running {}
        Ok(())
    }

    /// Step at most `frames` times, stopping early on termination.
    pub fn run_frames(&mut self, frames: u64) -> Result<Status, DrawError<S>> {
        for _ in 0..frames {
            if self.step()? == Status::Terminated {
                break;
            }
        }
        Ok(self.status)
    }

    /// Latest `(out0, out1)`, for the motor command path to read after each step.
    #[inline]
    pub fn outputs(&self) -> (f64, f64) {
        self.state.outputs()
    }

    #[inline]
    pub fn state(&self) -> &WaveformState {
        &self.state
    }

    #[inline]
    pub fn history(&self) -> (&HistoryBuffer, &HistoryBuffer) {
        (&self.history0, &self.history1)
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Frames stepped so far, including the terminating one.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Tear down: release the surface and input, hand back the final tuning.
    pub fn finish(self) -> WaveformState {
        let Self {
            state,
            surface,
            input,
            frames,
            ..
        } = self;
        drop(input);
        drop(surface);
        info!(
            frames,
            amplitude_deg = state.amplitude.to_degrees(),
            period_s = state.period,
            offset_deg = state.offset.to_degrees(),
            "tuner stopped"
        );
        state
    }
}
