//! Physical keyboard resource.
//!
//! [`KeyboardDevice`] holds the raw down/up state of the keys the scene
//! watches plus the device-wide "global capture" flag. The windowed binary
//! refreshes it from raylib every frame; tests drive it directly. A world
//! without this resource has no keyboard, which the scene treats as an
//! unrecoverable environment problem.

use bevy_ecs::prelude::Resource;
use raylib::prelude::KeyboardKey;
use smallvec::SmallVec;

#[derive(Resource, Debug, Clone)]
pub struct KeyboardDevice {
    down: SmallVec<[KeyboardKey; 8]>,
    /// When true the device swallows every key event, starving text fields.
    global_capture: bool,
}

impl Default for KeyboardDevice {
    fn default() -> Self {
        Self {
            down: SmallVec::new(),
            global_capture: true,
        }
    }
}

impl KeyboardDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_key_down(&self, key: KeyboardKey) -> bool {
        self.down.contains(&key)
    }

    pub fn set_key_down(&mut self, key: KeyboardKey, is_down: bool) {
        let present = self.down.iter().position(|k| *k == key);
        match (present, is_down) {
            (None, true) => self.down.push(key),
            (Some(i), false) => {
                self.down.swap_remove(i);
            }
            _ => {}
        }
    }

    pub fn press(&mut self, key: KeyboardKey) {
        self.set_key_down(key, true);
    }

    pub fn release(&mut self, key: KeyboardKey) {
        self.set_key_down(key, false);
    }

    pub fn global_capture(&self) -> bool {
        self.global_capture
    }

    pub fn set_global_capture(&mut self, capture: bool) {
        self.global_capture = capture;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut kb = KeyboardDevice::new();
        assert!(!kb.is_key_down(KeyboardKey::KEY_W));
        kb.press(KeyboardKey::KEY_W);
        kb.press(KeyboardKey::KEY_W);
        kb.press(KeyboardKey::KEY_UP);
        assert!(kb.is_key_down(KeyboardKey::KEY_W));
        kb.release(KeyboardKey::KEY_W);
        assert!(!kb.is_key_down(KeyboardKey::KEY_W));
        assert!(kb.is_key_down(KeyboardKey::KEY_UP));
    }

    #[test]
    fn global_capture_defaults_on() {
        let mut kb = KeyboardDevice::default();
        assert!(kb.global_capture());
        kb.set_global_capture(false);
        assert!(!kb.global_capture());
    }
}
