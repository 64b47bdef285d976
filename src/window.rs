//! SDL window backed by the embedded-graphics simulator.
//!
//! One window is both the output surface and the input source, so
//! [`open`] hands out two halves sharing it. Both live on the loop's thread.

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use tracing::info;

use crate::error::SurfaceError;
use crate::input::{InputEvent, InputSource, Key};
use crate::render::palette;
use crate::surface::{check_size, Surface};

/// Drawing half of the window.
pub struct WindowSurface {
    display: SimulatorDisplay<Rgb888>,
    window: Rc<RefCell<Window>>,
}

/// Keyboard and close-button half of the window.
pub struct WindowInput {
    window: Rc<RefCell<Window>>,
}

/// Open a window of `size` logical pixels, each drawn `scale` screen pixels wide.
///
/// The window is pushed to screen once before returning so a missing display
/// fails here rather than inside the loop.
pub fn open(
    title: &str,
    size: Size,
    scale: u32,
) -> Result<(WindowSurface, WindowInput), SurfaceError> {
    check_size(size)?;

    let mut display = SimulatorDisplay::<Rgb888>::new(size);
    display.clear(palette::BACKGROUND).ok();

    let settings = OutputSettingsBuilder::new().scale(scale.max(1)).build();
    let window = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut window = Window::new(title, &settings);
        window.update(&display);
        window
    }))
    .map_err(|payload| {
        let reason = payload
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
            .unwrap_or_else(|| "window backend panicked".into());
        SurfaceError::Unavailable(reason)
    })?;

    info!(width = size.width, height = size.height, scale, "window opened");
    let window = Rc::new(RefCell::new(window));
    Ok((
        WindowSurface {
            display,
            window: Rc::clone(&window),
        },
        WindowInput { window },
    ))
}

impl Surface for WindowSurface {
    type Target = SimulatorDisplay<Rgb888>;

    fn target(&mut self) -> &mut Self::Target {
        &mut self.display
    }

    fn present(&mut self) {
        self.window.borrow_mut().update(&self.display);
    }
}

impl InputSource for WindowInput {
    fn poll_events(&mut self, events: &mut Vec<InputEvent>) {
        events.extend(self.window.borrow_mut().events().filter_map(|event| match event {
            SimulatorEvent::Quit => Some(InputEvent::Quit),
            SimulatorEvent::KeyUp { keycode, .. } => {
                Some(map_key(keycode).map_or(InputEvent::Unrecognized, InputEvent::Key))
            }
            _ => None,
        }));
    }
}

fn map_key(keycode: Keycode) -> Option<Key> {
    let key = match keycode {
        Keycode::PageUp => Key::PageUp,
        Keycode::Plus | Keycode::KpPlus | Keycode::Equals => Key::Plus,
        Keycode::PageDown => Key::PageDown,
        Keycode::Minus | Keycode::KpMinus => Key::Minus,
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Right => Key::Right,
        Keycode::RightBracket => Key::RightBracket,
        Keycode::Left => Key::Left,
        Keycode::LeftBracket => Key::LeftBracket,
        Keycode::Escape => Key::Escape,
        _ => return None,
    };
    Some(key)
}
