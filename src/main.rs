use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sea_tuner::{Canvas, LoopDriver, Pacing, ScriptedInput, TunerConfig};

/// Interactive tuner for the two-channel actuator reference signal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Initial amplitude in degrees
    #[arg(long, default_value_t = 45.0, allow_negative_numbers = true)]
    amplitude: f64,
    /// Initial period in seconds (also the plot's reference period)
    #[arg(long, default_value_t = 10.0)]
    period: f64,
    /// Initial offset between the channels in degrees
    #[arg(long, default_value_t = 30.0)]
    offset: f64,
    /// Frame rate in Hz
    #[arg(long, default_value_t = 40.0)]
    fps: f64,
    #[arg(long, default_value_t = 1024)]
    width: u32,
    #[arg(long, default_value_t = 768)]
    height: u32,
    /// Window pixel scale
    #[arg(long, default_value_t = 1)]
    #[cfg_attr(not(feature = "window"), allow(dead_code))]
    scale: u32,
    /// Render into memory instead of a window (requires --frames)
    #[arg(long)]
    headless: bool,
    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,
    /// Don't sleep between frames
    #[arg(long)]
    unthrottled: bool,
}

impl Args {
    fn config(&self) -> TunerConfig {
        TunerConfig::default()
            .with_amplitude_degrees(self.amplitude)
            .with_period(self.period)
            .with_offset_degrees(self.offset)
            .with_frame_rate(self.fps)
            .with_canvas(self.width, self.height)
            .with_pacing(if self.unthrottled {
                Pacing::Unthrottled
            } else {
                Pacing::Realtime
            })
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder().with_env_filter(filter).init();

    let args = Args::parse();
    let config = args.config();

    if args.headless {
        let Some(frames) = args.frames else {
            bail!("--headless needs --frames, nothing could stop the loop otherwise");
        };
        return run_headless(&config, frames);
    }
    run_window(&config, &args)
}

fn run_headless(config: &TunerConfig, frames: u64) -> Result<()> {
    let canvas = Canvas::new(config.canvas).context("creating canvas")?;
    let mut driver =
        LoopDriver::new(config, canvas, ScriptedInput::new()).context("starting tuner")?;
    if let Err(never) = driver.run_frames(frames) {
        match never {}
    }

    let (out0, out1) = driver.outputs();
    info!(
        presented = driver.surface().presented(),
        out0_deg = out0.to_degrees(),
        out1_deg = out1.to_degrees(),
        "headless run complete"
    );
    driver.finish();
    Ok(())
}

#[cfg(feature = "window")]
fn run_window(config: &TunerConfig, args: &Args) -> Result<()> {
    let (surface, input) =
        sea_tuner::window::open("SEA tuner", config.canvas, args.scale).context("opening window")?;
    let mut driver = LoopDriver::new(config, surface, input).context("starting tuner")?;

    let stepped = match args.frames {
        Some(frames) => driver.run_frames(frames).map(|_| ()),
        None => driver.run(),
    };
    if let Err(never) = stepped {
        match never {}
    }

    driver.finish();
    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_window(_config: &TunerConfig, _args: &Args) -> Result<()> {
    bail!("built without the `window` feature; rebuild with --features window or pass --headless")
}
