//! Keyboard focus hand-over.
//!
//! Another UI element (a chat box, a dialog) triggers a
//! [`KeyboardFocusEvent`] to take the keyboard from the scene, and another
//! one to give it back. While the scene does not have focus every navigation
//! intent reads inactive; the device's global capture is left alone.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::warn;

use crate::resources::input::{FocusState, InputState};
use crate::resources::keyboard::KeyboardDevice;
use crate::systems::input::apply_focus;

/// Request to give (`enabled: true`) or take away the scene's keyboard.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardFocusEvent {
    pub enabled: bool,
}

/// Observer applying a [`KeyboardFocusEvent`].
pub fn keyboard_focus_observer(
    trigger: On<KeyboardFocusEvent>,
    device: Option<Res<KeyboardDevice>>,
    input: Option<ResMut<InputState>>,
) {
    let focus = if trigger.event().enabled {
        FocusState::Enabled
    } else {
        FocusState::Disabled
    };
    match (device, input) {
        (Some(device), Some(mut input)) => apply_focus(&device, &mut input, focus),
        (None, _) => warn!("Keyboard focus change ignored: no keyboard"),
        (_, None) => warn!("Keyboard focus change ignored: keys not registered"),
    }
}
