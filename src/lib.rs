//! Bench tuner for a two-channel coupled sine reference.
//!
//! Drives the tuning loop of a series-elastic actuator test rig: a sine of
//! adjustable amplitude and period on channel 0, the same sine shifted by a
//! fixed offset on channel 1, and a scrolling plot of both with annotated
//! amplitude, period and offset. The operator tunes from the keyboard while a
//! motor command path reads [`LoopDriver::outputs`] after every frame.
//!
//! ```no_run
//! use sea_tuner::{Canvas, LoopDriver, ScriptedInput, TunerConfig};
//!
//! let config = TunerConfig::default();
//! let canvas = Canvas::new(config.canvas).unwrap();
//! let mut driver = LoopDriver::new(&config, canvas, ScriptedInput::new()).unwrap();
//! driver.step().unwrap();
//! let (out0, out1) = driver.outputs();
//! ```
//!
//! The `window` feature adds an SDL window ([`window::open`]) that serves as
//! both surface and input source.

pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod history;
pub mod input;
pub mod render;
pub mod surface;
pub mod waveform;
#[cfg(feature = "window")]
pub mod window;

pub use config::{Pacing, StepSizes, TunerConfig};
pub use controller::{Flow, InteractionController};
pub use driver::{FramePacer, LoopDriver, Status};
pub use error::{ConfigError, Error, SurfaceError};
pub use generator::SignalGenerator;
pub use history::HistoryBuffer;
pub use input::{Action, InputEvent, InputSource, Key, KeyMap, ScriptedInput};
pub use render::Renderer;
pub use surface::{Canvas, Surface};
pub use waveform::WaveformState;
