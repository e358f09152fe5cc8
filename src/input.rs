//! Keyboard bindings for the window runner.
//!
//! Raw winit key events are reduced to a small [`KeyCode`] set, then looked up
//! in a [`Keymap`] to produce control [`Action`]s.
//!
//! | Key | Action |
//! |-----|--------|
//! | `Up` / `W` | speed up |
//! | `Down` / `S` | slow down |
//! | `+` / `=` / `Right` | more stars |
//! | `-` / `Left` | fewer stars |
//! | `Space` / `T` | turn around |
//! | `R` | reset |
//! | `P` | snapshot |
//! | `Escape` | quit |

use std::collections::HashMap;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::controls::Action;

/// Keys the runner cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    W, S, T, R, P,
    Up, Down, Left, Right,
    Plus, Minus,
    Space, Escape,
    Other,
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::KeyW => KeyCode::W,
            WinitKeyCode::KeyS => KeyCode::S,
            WinitKeyCode::KeyT => KeyCode::T,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::KeyP => KeyCode::P,

            WinitKeyCode::ArrowUp => KeyCode::Up,
            WinitKeyCode::ArrowDown => KeyCode::Down,
            WinitKeyCode::ArrowLeft => KeyCode::Left,
            WinitKeyCode::ArrowRight => KeyCode::Right,

            // `=` shares a key with `+` on most layouts.
            WinitKeyCode::Equal | WinitKeyCode::NumpadAdd => KeyCode::Plus,
            WinitKeyCode::Minus | WinitKeyCode::NumpadSubtract => KeyCode::Minus,

            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Escape => KeyCode::Escape,

            _ => KeyCode::Other,
        }
    }
}

/// Key to action lookup.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyCode, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        let bindings = [
            (KeyCode::Up, Action::SpeedUp),
            (KeyCode::W, Action::SpeedUp),
            (KeyCode::Down, Action::SlowDown),
            (KeyCode::S, Action::SlowDown),
            (KeyCode::Plus, Action::MoreStars),
            (KeyCode::Right, Action::MoreStars),
            (KeyCode::Minus, Action::FewerStars),
            (KeyCode::Left, Action::FewerStars),
            (KeyCode::Space, Action::TurnAround),
            (KeyCode::T, Action::TurnAround),
            (KeyCode::R, Action::Reset),
            (KeyCode::P, Action::Snapshot),
            (KeyCode::Escape, Action::Quit),
        ];
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }
}

impl Keymap {
    /// Rebind `key`, replacing any existing binding.
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.bindings.insert(key, action);
    }

    /// Action bound to `key`, if any.
    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// Resolve a key press, honoring auto-repeat only where it makes sense.
    ///
    /// Holding a speed key keeps accelerating; holding anything that reseeds
    /// or toggles fires once.
    pub fn action_for_press(&self, key: KeyCode, repeat: bool) -> Option<Action> {
        let action = self.action_for(key)?;
        if repeat && !matches!(action, Action::SpeedUp | Action::SlowDown) {
            return None;
        }
        Some(action)
    }

    /// Resolve a winit keyboard event. Releases are ignored.
    pub fn action_for_event(&self, event: &KeyEvent) -> Option<Action> {
        if event.state != ElementState::Pressed {
            return None;
        }
        match event.physical_key {
            PhysicalKey::Code(code) => self.action_for_press(code.into(), event.repeat),
            PhysicalKey::Unidentified(_) => None,
        }
    }
}
