//! Group tag component.
//!
//! Every static body spawned from an object layer is tagged with the name of
//! that layer, so the whole layer can be addressed as one collision group.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Group(String);

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}
