//! Coupled two-channel sine generator

use core::f64::consts::TAU;

use crate::waveform::WaveformState;

/// Advances the phase by a fixed time step each frame and derives both
/// channel outputs from it.
///
/// `out0 = amplitude · sin(phase)` and `out1 = out0 + offset`, so the two
/// channels always differ by exactly the offset.
#[derive(Clone, Copy, Debug)]
pub struct SignalGenerator {
    dt: f64,
}

impl SignalGenerator {
    /// `dt` is the simulated time per frame in seconds.
    pub fn new(dt: f64) -> Self {
        Self { dt }
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Advance one frame.
    #[inline]
    pub fn advance(&self, state: &mut WaveformState) {
        Self::advance_by(state, self.dt)
    }

    /// Advance `state` by `dt` seconds.
    ///
    /// A period of zero holds the phase where it is.
    pub fn advance_by(state: &mut WaveformState, dt: f64) {
        if state.period > 0.0 {
            state.phase += (TAU / state.period) * dt;
        }
        Self::refresh(state);
    }

    /// Re-derive the outputs from the current phase without moving it.
    ///
    /// Called after the tunables change so the outputs never disagree with them.
    pub fn refresh(state: &mut WaveformState) {
        state.out0 = state.amplitude * state.phase.sin();
        state.out1 = state.out0 + state.offset;
    }
}
