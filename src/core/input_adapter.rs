use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, KeyCode, ModifiersState, NamedKey, PhysicalKey};

use super::camera_controller::Adjust;

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    Other,
}

/// Non-character keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Left,
    Right,
    Up,
    Down,
}

/// Discrete input, already stripped of windowing-system detail
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseDown { button: PointerButton, x: i32, y: i32 },
    MouseUp { button: PointerButton, x: i32, y: i32 },
    MouseMotion { x: i32, y: i32 },
    Wheel { direction: Adjust, shift: bool },
    /// Printable key; letters keep their case
    Char { ch: char, alt: bool },
    Special { key: SpecialKey, shift: bool },
    Resize { width: u32, height: u32 },
    Quit,
}

/// Adapter that bridges Winit events to [`InputEvent`]s
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    modifiers: ModifiersState,
    cursor: Option<(i32, i32)>,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifiers(&self) -> ModifiersState {
        self.modifiers
    }

    pub fn set_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    /// Last known cursor position in physical pixels
    pub fn cursor(&self) -> Option<(i32, i32)> {
        self.cursor
    }

    /// Translate one window event; `None` for events the viewer ignores
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CloseRequested => Some(InputEvent::Quit),
            WindowEvent::Resized(size) => Some(InputEvent::Resize {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return None;
                }
                self.key_pressed(&event.logical_key, event.physical_key)
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let (x, y) = self.cursor?;
                let button = Self::pointer_button(*button);
                Some(match state {
                    ElementState::Pressed => InputEvent::MouseDown { button, x, y },
                    ElementState::Released => InputEvent::MouseUp { button, x, y },
                })
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x.round() as i32, position.y.round() as i32);
                self.cursor = Some((x, y));
                Some(InputEvent::MouseMotion { x, y })
            }
            WindowEvent::MouseWheel { delta, .. } => self.wheel(*delta),
            _ => None,
        }
    }

    /// Map a pressed key to an event. Digits come from the physical key so
    /// that Alt (Option on macOS) cannot turn them into other characters.
    pub fn key_pressed(&self, logical: &Key, physical: PhysicalKey) -> Option<InputEvent> {
        let alt = self.modifiers.alt_key();
        let shift = self.modifiers.shift_key();

        if let PhysicalKey::Code(code) = physical {
            if let Some(ch) = Self::digit(code) {
                return Some(InputEvent::Char { ch, alt });
            }
        }

        match logical {
            Key::Named(NamedKey::Escape) => Some(InputEvent::Quit),
            Key::Named(NamedKey::ArrowLeft) => Some(InputEvent::Special { key: SpecialKey::Left, shift }),
            Key::Named(NamedKey::ArrowRight) => Some(InputEvent::Special { key: SpecialKey::Right, shift }),
            Key::Named(NamedKey::ArrowUp) => Some(InputEvent::Special { key: SpecialKey::Up, shift }),
            Key::Named(NamedKey::ArrowDown) => Some(InputEvent::Special { key: SpecialKey::Down, shift }),
            Key::Character(text) => text.chars().next().map(|ch| InputEvent::Char { ch, alt }),
            _ => None,
        }
    }

    /// Scroll direction only; the magnitude is ignored.
    ///
    /// With Shift held, a zero vertical delta falls back to the horizontal
    /// one: macOS reports Shift+scroll as horizontal.
    pub fn wheel(&self, delta: MouseScrollDelta) -> Option<InputEvent> {
        let shift = self.modifiers.shift_key();
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (f64::from(x), f64::from(y)),
            MouseScrollDelta::PixelDelta(position) => (position.x, position.y),
        };
        let amount = if dy == 0.0 && shift { dx } else { dy };
        let direction = if amount > 0.0 {
            Adjust::Increase
        } else if amount < 0.0 {
            Adjust::Decrease
        } else {
            return None;
        };
        Some(InputEvent::Wheel { direction, shift })
    }

    fn digit(code: KeyCode) -> Option<char> {
        match code {
            KeyCode::Digit0 | KeyCode::Numpad0 => Some('0'),
            KeyCode::Digit1 | KeyCode::Numpad1 => Some('1'),
            KeyCode::Digit2 | KeyCode::Numpad2 => Some('2'),
            KeyCode::Digit3 | KeyCode::Numpad3 => Some('3'),
            KeyCode::Digit4 | KeyCode::Numpad4 => Some('4'),
            _ => None,
        }
    }

    fn pointer_button(button: MouseButton) -> PointerButton {
        match button {
            MouseButton::Left => PointerButton::Left,
            MouseButton::Right => PointerButton::Right,
            MouseButton::Middle => PointerButton::Middle,
            _ => PointerButton::Other,
        }
    }
}
