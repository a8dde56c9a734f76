/// Platform-agnostic input handling
use crate::controller::game_loop::GameAction;

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown { key: String, repeat: bool },
    /// Click or tap anywhere on the playfield
    PointerDown,
    /// The "Play Again" button on the game-over banner
    PlayAgain,
}

/// Key mapping configuration
#[derive(Clone, Debug)]
pub struct KeyBindings {
    pub action: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            // `KeyboardEvent.key` reports a literal space, winit's named key is "Space"
            action: vec![" ".to_string(), "Space".to_string(), "Spacebar".to_string()],
        }
    }
}

/// Maps input events to game actions
#[derive(Clone, Debug, Default)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn is_action_key(&self, key: &str) -> bool {
        self.bindings.action.iter().any(|k| k == key)
    }

    /// Auto-repeat keydowns are dropped so holding the key does not restart
    /// a session that just ended.
    pub fn action_for(&self, event: &InputEvent) -> Option<GameAction> {
        match event {
            InputEvent::KeyDown { key, repeat: false } if self.is_action_key(key) => {
                Some(GameAction::SpaceKey)
            }
            InputEvent::PointerDown => Some(GameAction::Jump),
            InputEvent::PlayAgain => Some(GameAction::Start),
            InputEvent::KeyDown { .. } => None,
        }
    }
}

pub mod wasm {
    use super::*;
    use web_sys::KeyboardEvent;

    pub fn keyboard_event_to_input(e: &KeyboardEvent) -> InputEvent {
        InputEvent::KeyDown {
            key: e.key(),
            repeat: e.repeat(),
        }
    }
}

/// winit conversions for the native window
#[cfg(not(target_arch = "wasm32"))]
pub mod native {
    use super::*;
    use winit::event::{ElementState, KeyEvent, MouseButton, Touch, TouchPhase, WindowEvent};
    use winit::keyboard::{Key, NamedKey};

    /// winit reports the space bar as a named key, everything else as text
    pub fn key_name(key: &Key) -> Option<String> {
        match key {
            Key::Named(NamedKey::Space) => Some("Space".to_string()),
            Key::Named(named) => Some(format!("{named:?}")),
            Key::Character(text) => Some(text.to_string()),
            _ => None,
        }
    }

    /// Presses become game input even when egui consumed them, since the
    /// playfield panel covers the whole window.
    pub fn window_event_to_input(event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent { state: ElementState::Pressed, logical_key, repeat, .. },
                ..
            } => key_name(logical_key).map(|key| InputEvent::KeyDown { key, repeat: *repeat }),
            WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } => {
                Some(InputEvent::PointerDown)
            }
            WindowEvent::Touch(Touch { phase: TouchPhase::Started, .. }) => Some(InputEvent::PointerDown),
            _ => None,
        }
    }
}
