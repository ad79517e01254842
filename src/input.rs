use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keys currently held down, polled once per update.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key) = event.physical_key {
            self.handle_key(key, event.state == ElementState::Pressed);
        }
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Forgets held keys; releases are not delivered while unfocused.
    pub fn reset(&mut self) {
        self.keys_down.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();
        assert!(!input.is_key_down(KeyCode::Escape));

        input.handle_key(KeyCode::Escape, true);
        assert!(input.is_key_down(KeyCode::Escape));
        assert!(!input.is_key_down(KeyCode::Space));

        input.handle_key(KeyCode::Escape, false);
        assert!(!input.is_key_down(KeyCode::Escape));
    }

    #[test]
    fn test_reset_clears_held_keys() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::KeyW, true);
        input.handle_key(KeyCode::Escape, true);
        input.reset();
        assert!(!input.is_key_down(KeyCode::KeyW));
        assert!(!input.is_key_down(KeyCode::Escape));
    }
}
