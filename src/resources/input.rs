//! Per-frame keyboard input resource.
//!
//! [`InputState`] turns the physical [`KeyboardDevice`] into four
//! navigation intents. Each intent is bound to two keys (an arrow key and its
//! W/S/A/D twin) and is active while either is held. The raw arrow keys are
//! also passed through untouched as [`CursorKeys`].
//!
//! Focus is explicit: while [`FocusState::Disabled`] every intent and cursor
//! key reads inactive regardless of what is physically held, so another UI
//! element (a chat box) can own the keyboard. Bindings survive the toggle.

use bevy_ecs::prelude::*;
use raylib::prelude::KeyboardKey;
use smallvec::{SmallVec, smallvec};

use crate::resources::keyboard::KeyboardDevice;

/// Whether the scene currently owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Enabled,
    Disabled,
}

#[derive(Debug, Clone)]
/// Boolean intent state with its keyboard bindings.
pub struct BoolState {
    /// Whether the intent is currently active this frame.
    pub active: bool,
    /// Whether the intent became active this frame.
    pub just_pressed: bool,
    /// Whether the intent stopped being active this frame.
    pub just_released: bool,

    /// Keys that drive this intent; any one held makes it active.
    pub key_bindings: SmallVec<[KeyboardKey; 2]>,
}

impl BoolState {
    pub fn bound_to(keys: &[KeyboardKey]) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_bindings: keys.iter().copied().collect(),
        }
    }

    fn update(&mut self, active: bool) {
        self.just_pressed = active && !self.active;
        self.just_released = !active && self.active;
        self.active = active;
    }

    fn sample(&mut self, device: &KeyboardDevice) {
        let active = self.key_bindings.iter().any(|k| device.is_key_down(*k));
        self.update(active);
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_bindings: smallvec![],
        }
    }
}

/// Raw state of the engine's cursor keys, independent of W/S/A/D.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub space: bool,
    pub shift: bool,
}

impl CursorKeys {
    fn read(device: &KeyboardDevice) -> Self {
        Self {
            up: device.is_key_down(KeyboardKey::KEY_UP),
            down: device.is_key_down(KeyboardKey::KEY_DOWN),
            left: device.is_key_down(KeyboardKey::KEY_LEFT),
            right: device.is_key_down(KeyboardKey::KEY_RIGHT),
            space: device.is_key_down(KeyboardKey::KEY_SPACE),
            shift: device.is_key_down(KeyboardKey::KEY_LEFT_SHIFT)
                || device.is_key_down(KeyboardKey::KEY_RIGHT_SHIFT),
        }
    }
}

/// Immutable per-tick read of the navigation intents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub cursors: CursorKeys,
}

impl InputSnapshot {
    pub fn any_direction(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Resource capturing the keyboard state relevant to navigation.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub up: BoolState,
    pub down: BoolState,
    pub left: BoolState,
    pub right: BoolState,
    pub cursors: CursorKeys,
    focus: FocusState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            up: BoolState::bound_to(&[KeyboardKey::KEY_UP, KeyboardKey::KEY_W]),
            down: BoolState::bound_to(&[KeyboardKey::KEY_DOWN, KeyboardKey::KEY_S]),
            left: BoolState::bound_to(&[KeyboardKey::KEY_LEFT, KeyboardKey::KEY_A]),
            right: BoolState::bound_to(&[KeyboardKey::KEY_RIGHT, KeyboardKey::KEY_D]),
            cursors: CursorKeys::default(),
            focus: FocusState::Enabled,
        }
    }
}

impl InputState {
    pub fn focus(&self) -> FocusState {
        self.focus
    }

    pub fn is_enabled(&self) -> bool {
        self.focus == FocusState::Enabled
    }

    pub fn set_focus(&mut self, focus: FocusState) {
        self.focus = focus;
    }

    /// Every key the bindings and cursor passthrough read from the device.
    pub fn watched_keys(&self) -> SmallVec<[KeyboardKey; 16]> {
        let mut keys: SmallVec<[KeyboardKey; 16]> = SmallVec::new();
        for state in [&self.up, &self.down, &self.left, &self.right] {
            keys.extend(state.key_bindings.iter().copied());
        }
        keys.extend([
            KeyboardKey::KEY_SPACE,
            KeyboardKey::KEY_LEFT_SHIFT,
            KeyboardKey::KEY_RIGHT_SHIFT,
        ]);
        keys
    }

    /// Refresh intents from the device. While disabled everything reads inactive.
    pub fn sample(&mut self, device: &KeyboardDevice) {
        if self.is_enabled() {
            self.up.sample(device);
            self.down.sample(device);
            self.left.sample(device);
            self.right.sample(device);
            self.cursors = CursorKeys::read(device);
        } else {
            self.up.update(false);
            self.down.update(false);
            self.left.update(false);
            self.right.update(false);
            self.cursors = CursorKeys::default();
        }
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            up: self.up.active,
            down: self.down.active,
            left: self.left.active,
            right: self.right.active,
            cursors: self.cursors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputstate_default_bindings() {
        let input = InputState::default();
        assert_eq!(
            input.up.key_bindings.as_slice(),
            &[KeyboardKey::KEY_UP, KeyboardKey::KEY_W]
        );
        assert_eq!(
            input.down.key_bindings.as_slice(),
            &[KeyboardKey::KEY_DOWN, KeyboardKey::KEY_S]
        );
        assert_eq!(
            input.left.key_bindings.as_slice(),
            &[KeyboardKey::KEY_LEFT, KeyboardKey::KEY_A]
        );
        assert_eq!(
            input.right.key_bindings.as_slice(),
            &[KeyboardKey::KEY_RIGHT, KeyboardKey::KEY_D]
        );
        assert_eq!(input.focus(), FocusState::Enabled);
    }

    #[test]
    fn test_either_binding_activates_intent() {
        let mut input = InputState::default();
        let mut kb = KeyboardDevice::new();
        kb.press(KeyboardKey::KEY_A);
        input.sample(&kb);
        assert!(input.left.active);
        assert!(input.left.just_pressed);
        assert!(!input.cursors.left);

        kb.release(KeyboardKey::KEY_A);
        kb.press(KeyboardKey::KEY_LEFT);
        input.sample(&kb);
        assert!(input.left.active);
        assert!(!input.left.just_pressed);
        assert!(input.cursors.left);
    }

    #[test]
    fn test_disabled_reads_inactive() {
        let mut input = InputState::default();
        let mut kb = KeyboardDevice::new();
        kb.press(KeyboardKey::KEY_W);
        kb.press(KeyboardKey::KEY_RIGHT);
        input.sample(&kb);
        assert!(input.up.active);

        input.set_focus(FocusState::Disabled);
        input.sample(&kb);
        let snap = input.snapshot();
        assert!(!snap.any_direction());
        assert_eq!(snap.cursors, CursorKeys::default());
        assert!(input.up.just_released);
    }

    #[test]
    fn test_watched_keys_cover_bindings() {
        let input = InputState::default();
        let keys = input.watched_keys();
        for k in [
            KeyboardKey::KEY_W,
            KeyboardKey::KEY_S,
            KeyboardKey::KEY_A,
            KeyboardKey::KEY_D,
            KeyboardKey::KEY_UP,
            KeyboardKey::KEY_DOWN,
            KeyboardKey::KEY_LEFT,
            KeyboardKey::KEY_RIGHT,
            KeyboardKey::KEY_SPACE,
        ] {
            assert!(keys.contains(&k));
        }
    }
}
