//! Event types and observers.
//!
//! Submodules:
//! - [`keyboardfocus`] – hand the keyboard to or from the scene
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod keyboardfocus;
pub mod switchdebug;
