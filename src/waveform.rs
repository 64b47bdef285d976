use crate::config::TunerConfig;

/// Tunable parameters of the coupled sine pair plus its running phase.
///
/// `phase`, `out0` and `out1` are written only by
/// [`SignalGenerator`](crate::generator::SignalGenerator); the controller
/// touches the three tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveformState {
    pub(crate) phase: f64,
    /// Radians, signed. A negative amplitude inverts the waveform.
    pub amplitude: f64,
    /// Seconds, never below zero. Zero freezes the phase.
    pub period: f64,
    /// Radians, never below zero.
    pub offset: f64,
    pub(crate) out0: f64,
    pub(crate) out1: f64,
}

impl WaveformState {
    pub fn new(amplitude: f64, period: f64, offset: f64) -> Self {
        Self {
            phase: 0.0,
            amplitude,
            period,
            offset,
            out0: 0.0,
            out1: offset,
        }
    }

    pub fn from_config(config: &TunerConfig) -> Self {
        Self::new(config.amplitude, config.period, config.offset)
    }

    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    #[inline]
    pub fn out0(&self) -> f64 {
        self.out0
    }

    #[inline]
    pub fn out1(&self) -> f64 {
        self.out1
    }

    /// Both channel outputs, copied.
    #[inline]
    pub fn outputs(&self) -> (f64, f64) {
        (self.out0, self.out1)
    }
}

impl Default for WaveformState {
    fn default() -> Self {
        Self::from_config(&TunerConfig::default())
    }
}
