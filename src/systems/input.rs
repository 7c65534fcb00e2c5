//! Input systems and keyboard focus control.
//!
//! - [`poll_keyboard`] copies the watched keys' raylib state into
//!   [`KeyboardDevice`] each frame and emits the debug toggle.
//! - [`update_input_state`] turns the device into navigation intents.
//! - [`register_keys`], [`enable_keys`] and [`disable_keys`] manage which
//!   keys the scene listens to and whether it owns the keyboard at all.
//!   The same toggle is reachable as an event through
//!   [`KeyboardFocusEvent`](crate::events::keyboardfocus::KeyboardFocusEvent).
use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::prelude::{KeyboardKey, RaylibHandle};

use crate::error::{SceneError, SceneResult};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::{FocusState, InputState};
use crate::resources::keyboard::KeyboardDevice;

const DEBUG_TOGGLE_KEY: KeyboardKey = KeyboardKey::KEY_F11;

/// Install the navigation bindings (arrows plus W/S/A/D).
///
/// Fails when the world has no keyboard. Global capture is switched off so
/// other UI keeps receiving keys until [`enable_keys`] runs. Re-registering
/// keeps the current focus state.
pub fn register_keys(world: &mut World) -> SceneResult<()> {
    let Some(mut device) = world.get_resource_mut::<KeyboardDevice>() else {
        return Err(SceneError::KeyboardUnavailable);
    };
    device.set_global_capture(false);
    let focus = world
        .get_resource::<InputState>()
        .map(InputState::focus)
        .unwrap_or_default();
    let mut input = InputState::default();
    input.set_focus(focus);
    debug!("Registered {} watched keys", input.watched_keys().len());
    world.insert_resource(input);
    Ok(())
}

/// Give the scene the keyboard: intents follow the held keys again.
pub fn enable_keys(world: &mut World) -> SceneResult<()> {
    set_focus(world, FocusState::Enabled)
}

/// Release the keyboard to another element: every intent reads inactive
/// until re-enabled.
pub fn disable_keys(world: &mut World) -> SceneResult<()> {
    set_focus(world, FocusState::Disabled)
}

fn set_focus(world: &mut World, focus: FocusState) -> SceneResult<()> {
    if !world.contains_resource::<KeyboardDevice>() {
        return Err(SceneError::KeyboardUnavailable);
    }
    world.init_resource::<InputState>();
    world.resource_scope(|world, device: Mut<KeyboardDevice>| {
        let mut input = world.resource_mut::<InputState>();
        apply_focus(&device, &mut input, focus);
    });
    Ok(())
}

/// Apply a focus change and resample the intents right away.
///
/// Global capture stays as [`register_keys`] left it; focus only decides
/// whether the bound keys produce intents.
pub fn apply_focus(device: &KeyboardDevice, input: &mut InputState, focus: FocusState) {
    input.set_focus(focus);
    input.sample(device);
    info!("Keyboard focus {:?}", focus);
}

/// Refresh [`InputState`] from the [`KeyboardDevice`].
pub fn update_input_state(device: Option<Res<KeyboardDevice>>, mut input: ResMut<InputState>) {
    if let Some(device) = device {
        input.sample(&device);
    }
}

/// Copy raylib's key state for every watched key into the device.
pub fn poll_keyboard(world: &mut World, rl: &RaylibHandle) {
    // the device keeps tracking keys while unfocused so that
    // re-enabling sees what is physically held right away
    let keys = world
        .get_resource::<InputState>()
        .map(InputState::watched_keys)
        .unwrap_or_default();
    if let Some(mut device) = world.get_resource_mut::<KeyboardDevice>() {
        for key in keys {
            device.set_key_down(key, rl.is_key_down(key));
        }
    }
    if rl.is_key_pressed(DEBUG_TOGGLE_KEY) {
        world.trigger(SwitchDebugEvent {});
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_without_keyboard_fails() {
        let mut world = World::new();
        assert!(matches!(
            register_keys(&mut world),
            Err(SceneError::KeyboardUnavailable)
        ));
        assert!(matches!(
            disable_keys(&mut world),
            Err(SceneError::KeyboardUnavailable)
        ));
        assert!(world.get_resource::<InputState>().is_none());
    }

    #[test]
    fn disable_then_enable_round_trip() {
        let mut world = World::new();
        world.insert_resource(KeyboardDevice::new());
        register_keys(&mut world).unwrap();

        disable_keys(&mut world).unwrap();
        assert_eq!(world.resource::<InputState>().focus(), FocusState::Disabled);
        assert!(!world.resource::<KeyboardDevice>().global_capture());

        // focus never takes global capture back from other UI
        enable_keys(&mut world).unwrap();
        assert_eq!(world.resource::<InputState>().focus(), FocusState::Enabled);
        assert!(!world.resource::<KeyboardDevice>().global_capture());
        assert_eq!(world.resource::<InputState>().up.key_bindings.len(), 2);
    }

    #[test]
    fn register_keeps_focus() {
        let mut world = World::new();
        world.insert_resource(KeyboardDevice::new());
        disable_keys(&mut world).unwrap();
        register_keys(&mut world).unwrap();
        assert_eq!(world.resource::<InputState>().focus(), FocusState::Disabled);
    }

    #[test]
    fn register_releases_global_capture() {
        let mut world = World::new();
        world.insert_resource(KeyboardDevice::new());
        enable_keys(&mut world).unwrap();
        register_keys(&mut world).unwrap();
        assert!(!world.resource::<KeyboardDevice>().global_capture());
        assert!(world.resource::<InputState>().is_enabled());
    }

    #[test]
    fn focus_change_applies_without_a_frame() {
        let mut world = World::new();
        let mut kb = KeyboardDevice::new();
        kb.press(KeyboardKey::KEY_D);
        kb.press(KeyboardKey::KEY_UP);
        world.insert_resource(kb);
        register_keys(&mut world).unwrap();

        let mut schedule = Schedule::default();
        schedule.add_systems(update_input_state);
        schedule.run(&mut world);
        assert!(world.resource::<InputState>().snapshot().right);

        disable_keys(&mut world).unwrap();
        let snap = world.resource::<InputState>().snapshot();
        assert!(!snap.any_direction());
        assert!(!snap.cursors.up);

        enable_keys(&mut world).unwrap();
        let snap = world.resource::<InputState>().snapshot();
        assert!(snap.right);
        assert!(snap.up);
        assert!(snap.cursors.up);
    }

    #[test]
    fn update_system_samples_device() {
        let mut world = World::new();
        let mut kb = KeyboardDevice::new();
        kb.press(KeyboardKey::KEY_D);
        world.insert_resource(kb);
        register_keys(&mut world).unwrap();

        let mut schedule = Schedule::default();
        schedule.add_systems(update_input_state);
        schedule.run(&mut world);
        assert!(world.resource::<InputState>().right.active);

        disable_keys(&mut world).unwrap();
        schedule.run(&mut world);
        assert!(!world.resource::<InputState>().snapshot().right);

        // still physically held: visible again as soon as focus returns
        enable_keys(&mut world).unwrap();
        schedule.run(&mut world);
        assert!(world.resource::<InputState>().snapshot().right);
    }
}
