//! Input events, key bindings and event sources.
//!
//! Backends translate their native events into [`InputEvent`]s; the
//! [`KeyMap`] turns keys into [`Action`]s for the controller.

use std::collections::VecDeque;

use hashbrown::HashMap;
use itertools::Itertools;

/// Keys the tuner knows about. Backends drop everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    PageUp,
    Plus,
    PageDown,
    Minus,
    Up,
    Down,
    Right,
    RightBracket,
    Left,
    LeftBracket,
    Escape,
}

impl Key {
    /// Name shown in the on-screen legend
    pub fn label(self) -> &'static str {
        match self {
            Key::PageUp => "PAGE-UP",
            Key::Plus => "+",
            Key::PageDown => "PAGE-DOWN",
            Key::Minus => "-",
            Key::Up => "ARROW-UP",
            Key::Down => "ARROW-DOWN",
            Key::Right => "ARROW-RIGHT",
            Key::RightBracket => "]",
            Key::Left => "ARROW-LEFT",
            Key::LeftBracket => "[",
            Key::Escape => "ESC",
        }
    }
}

/// One discrete event from the input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// The window was asked to close
    Quit,
    /// A key was released
    Key(Key),
    /// Anything the backend saw but has no meaning here
    Unrecognized,
}

/// What a key does to the tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    AmplitudeUp,
    AmplitudeDown,
    OffsetUp,
    OffsetDown,
    PeriodUp,
    PeriodDown,
    Terminate,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::AmplitudeUp,
        Action::AmplitudeDown,
        Action::OffsetUp,
        Action::OffsetDown,
        Action::PeriodUp,
        Action::PeriodDown,
        Action::Terminate,
    ];
}

/// Key to action bindings. Several keys may share an action.
#[derive(Clone, Debug)]
pub struct KeyMap {
    bindings: HashMap<Key, Action>,
}

impl KeyMap {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Binds `key` to `action`, replacing any previous binding of `key`.
    pub fn bind(&mut self, key: Key, action: Action) -> &mut Self {
        self.bindings.insert(key, action);
        self
    }

    pub fn unbind(&mut self, key: Key) -> Option<Action> {
        self.bindings.remove(&key)
    }

    #[inline]
    pub fn action(&self, key: Key) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// Keys bound to `action`, in a stable order.
    pub fn keys_for(&self, action: Action) -> Vec<Key> {
        self.bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| *k)
            .sorted()
            .collect()
    }

    /// One line listing the bound keys, grouped by action.
    pub fn legend(&self) -> String {
        Action::ALL
            .iter()
            .map(|&action| self.keys_for(action).into_iter().map(Key::label).join("/"))
            .filter(|keys| !keys.is_empty())
            .join(" ")
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(Key::PageUp, Action::AmplitudeUp)
            .bind(Key::Plus, Action::AmplitudeUp)
            .bind(Key::PageDown, Action::AmplitudeDown)
            .bind(Key::Minus, Action::AmplitudeDown)
            .bind(Key::Up, Action::OffsetUp)
            .bind(Key::Down, Action::OffsetDown)
            .bind(Key::Right, Action::PeriodUp)
            .bind(Key::RightBracket, Action::PeriodUp)
            .bind(Key::Left, Action::PeriodDown)
            .bind(Key::LeftBracket, Action::PeriodDown)
            .bind(Key::Escape, Action::Terminate);
        map
    }
}

/// A non-blocking queue of pending input.
pub trait InputSource {
    /// Append everything that arrived since the last call to `events`, in
    /// arrival order. Returns immediately when the queue is empty.
    fn poll_events(&mut self, events: &mut Vec<InputEvent>);
}

/// Input queued up front, for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    pending: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn press(&mut self, key: Key) {
        self.push(InputEvent::Key(key));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FromIterator<InputEvent> for ScriptedInput {
    fn from_iter<T: IntoIterator<Item = InputEvent>>(iter: T) -> Self {
        Self {
            pending: iter.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self, events: &mut Vec<InputEvent>) {
        events.extend(self.pending.drain(..));
    }
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn poll_events(&mut self, events: &mut Vec<InputEvent>) {
        (**self).poll_events(events)
    }
}
