//! Keyboard-driven tuning of the waveform parameters.

use tracing::debug;

use crate::config::StepSizes;
use crate::generator::SignalGenerator;
use crate::input::{Action, InputEvent, InputSource, KeyMap};
use crate::waveform::WaveformState;

/// Result of one poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Terminate,
}

/// Applies key presses to a [`WaveformState`].
///
/// Offset and period are floored at zero; amplitude is not bounded in either
/// direction, so stepping below zero inverts the waveform.
#[derive(Clone, Debug)]
pub struct InteractionController {
    keymap: KeyMap,
    steps: StepSizes,
    /// Reused between polls
    pending: Vec<InputEvent>,
}

impl InteractionController {
    pub fn new(steps: StepSizes) -> Self {
        Self::with_keymap(steps, KeyMap::default())
    }

    pub fn with_keymap(steps: StepSizes, keymap: KeyMap) -> Self {
        Self {
            keymap,
            steps,
            pending: Vec::new(),
        }
    }

    #[inline]
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    #[inline]
    pub fn steps(&self) -> StepSizes {
        self.steps
    }

    /// Drain `input` and apply every event in arrival order.
    ///
    /// A quit or terminate stops processing; events after it in the same
    /// batch are dropped and the parameters are left as they were.
    pub fn poll(&mut self, state: &mut WaveformState, input: &mut impl InputSource) -> Flow {
        self.pending.clear();
        input.poll_events(&mut self.pending);

        let mut flow = Flow::Continue;
        for &event in &self.pending {
            if self.handle(state, event) == Flow::Terminate {
                flow = Flow::Terminate;
                break;
            }
        }
        self.pending.clear();
        flow
    }

    /// Apply a single event.
    pub fn handle(&self, state: &mut WaveformState, event: InputEvent) -> Flow {
        match event {
            InputEvent::Quit => Flow::Terminate,
            InputEvent::Key(key) => match self.keymap.action(key) {
                Some(action) => self.apply(state, action),
                None => Flow::Continue,
            },
            InputEvent::Unrecognized => Flow::Continue,
        }
    }

    /// Apply one action.
    pub fn apply(&self, state: &mut WaveformState, action: Action) -> Flow {
        match action {
            Action::AmplitudeUp => state.amplitude += self.steps.amplitude,
            Action::AmplitudeDown => state.amplitude -= self.steps.amplitude,
            Action::OffsetUp => state.offset += self.steps.offset,
            Action::OffsetDown => state.offset = (state.offset - self.steps.offset).max(0.0),
            Action::PeriodUp => state.period += self.steps.period,
            Action::PeriodDown => state.period = (state.period - self.steps.period).max(0.0),
            Action::Terminate => return Flow::Terminate,
        }

        SignalGenerator::refresh(state);
        debug!(
            ?action,
            amplitude_deg = state.amplitude.to_degrees(),
            offset_deg = state.offset.to_degrees(),
            period_s = state.period,
            "tuning changed"
        );
        Flow::Continue
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(StepSizes::default())
    }
}
