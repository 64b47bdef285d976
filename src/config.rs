//! Tuning configuration and derived constants.
//!
//! All angles are stored in radians. Degree-based setters exist because
//! that is how an operator thinks about the rig.

use embedded_graphics::prelude::Size;

use crate::error::ConfigError;

/// Largest history window either channel may hold, in samples.
pub const MAX_HISTORY_CAPACITY: usize = 1 << 24;

/// Increments applied by one key press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepSizes {
    /// Radians per amplitude-up/down press
    pub amplitude: f64,
    /// Radians per offset-up/down press
    pub offset: f64,
    /// Seconds per period-up/down press
    pub period: f64,
}

impl Default for StepSizes {
    fn default() -> Self {
        Self {
            amplitude: 10f64.to_radians(),
            offset: 10f64.to_radians(),
            period: 1.0,
        }
    }
}

/// How the loop driver bounds its frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep out the remainder of every frame
    Realtime,
    /// Run frames back to back (offline rendering, tests)
    Unthrottled,
}

/// Startup parameters of the tuner.
#[derive(Clone, Debug, PartialEq)]
pub struct TunerConfig {
    pub amplitude: f64,
    pub period: f64,
    pub offset: f64,
    pub frame_rate: f64,
    /// History window length, in multiples of the initial period
    pub lookback: f64,
    pub canvas: Size,
    pub steps: StepSizes,
    pub pacing: Pacing,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            amplitude: 45f64.to_radians(),
            period: 10.0,
            offset: 30f64.to_radians(),
            frame_rate: 40.0,
            lookback: 1.0,
            canvas: Size::new(1024, 768),
            steps: StepSizes::default(),
            pacing: Pacing::Realtime,
        }
    }
}

impl TunerConfig {
    pub fn with_amplitude_degrees(mut self, degrees: f64) -> Self {
        self.amplitude = degrees.to_radians();
        self
    }

    pub fn with_offset_degrees(mut self, degrees: f64) -> Self {
        self.offset = degrees.to_radians();
        self
    }

    pub fn with_period(mut self, seconds: f64) -> Self {
        self.period = seconds;
        self
    }

    pub fn with_frame_rate(mut self, hz: f64) -> Self {
        self.frame_rate = hz;
        self
    }

    pub fn with_lookback(mut self, periods: f64) -> Self {
        self.lookback = periods;
        self
    }

    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas = Size::new(width, height);
        self
    }

    pub fn with_steps(mut self, steps: StepSizes) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Simulated time covered by one frame, in seconds.
    #[inline]
    pub fn sample_period(&self) -> f64 {
        1.0 / self.frame_rate
    }

    /// Period the plot's period arrow is scaled against.
    #[inline]
    pub fn reference_period(&self) -> f64 {
        self.period
    }

    /// Number of samples each history buffer keeps.
    ///
    /// `reference period × lookback × frame rate`, i.e. 400 for the defaults.
    pub fn history_capacity(&self) -> usize {
        self.history_samples() as usize
    }

    fn history_samples(&self) -> f64 {
        (self.reference_period() * self.lookback * self.frame_rate).round()
    }

    /// Checks everything the loop relies on before the first frame.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(ConfigError::new(
                "frame_rate",
                "must be a positive number of frames per second",
            ));
        }
        if !self.period.is_finite() || self.period < 0.0 {
            return Err(ConfigError::new("period", "must be zero or a positive number of seconds"));
        }
        if !self.offset.is_finite() || self.offset < 0.0 {
            return Err(ConfigError::new("offset", "must be zero or positive"));
        }
        if !self.amplitude.is_finite() {
            return Err(ConfigError::new("amplitude", "must be finite"));
        }
        if !self.lookback.is_finite() || self.lookback <= 0.0 {
            return Err(ConfigError::new("lookback", "must be positive"));
        }
        let samples = self.history_samples();
        if samples < 1.0 {
            return Err(ConfigError::new(
                "lookback",
                "history window holds no samples at this period and frame rate",
            ));
        }
        if samples > MAX_HISTORY_CAPACITY as f64 {
            return Err(ConfigError::new(
                "lookback",
                "history window is too long for this period and frame rate",
            ));
        }
        for (name, step) in [
            ("steps.amplitude", self.steps.amplitude),
            ("steps.offset", self.steps.offset),
            ("steps.period", self.steps.period),
        ] {
            if !step.is_finite() || step < 0.0 {
                return Err(ConfigError::new(name, "must be zero or positive"));
            }
        }
        Ok(())
    }
}
