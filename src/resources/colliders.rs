//! Registered collision relationships.
//!
//! The scene declares which things collide by recording [`ColliderPair`]s:
//! a handful of subject entities (the player body and its visual container)
//! against either a named group of static bodies or a named tile layer. The
//! collision system resolves only what is registered here. Registration is
//! per group, never per object.

use bevy_ecs::prelude::{Entity, Resource};
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColliderTarget {
    /// Static bodies tagged with this [`Group`](crate::components::group::Group).
    Group(String),
    /// Collidable cells of the named tile layer.
    TileLayer(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColliderPair {
    pub subjects: SmallVec<[Entity; 2]>,
    pub target: ColliderTarget,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct ColliderRegistry {
    pairs: Vec<ColliderPair>,
}

impl ColliderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, subjects: &[Entity], target: ColliderTarget) {
        self.pairs.push(ColliderPair {
            subjects: subjects.iter().copied().collect(),
            target,
        });
    }

    pub fn pairs(&self) -> &[ColliderPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Targets registered against `subject`.
    pub fn targets_of(&self, subject: Entity) -> impl Iterator<Item = &ColliderTarget> {
        self.pairs
            .iter()
            .filter(move |p| p.subjects.contains(&subject))
            .map(|p| &p.target)
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn targets_of_filters_by_subject() {
        let mut world = World::new();
        let player = world.spawn_empty().id();
        let container = world.spawn_empty().id();
        let other = world.spawn_empty().id();

        let mut reg = ColliderRegistry::new();
        reg.add(&[player, container], ColliderTarget::Group("Basement".into()));
        reg.add(&[player], ColliderTarget::TileLayer("Ground".into()));

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.targets_of(player).count(), 2);
        assert_eq!(
            reg.targets_of(container).collect::<Vec<_>>(),
            vec![&ColliderTarget::Group("Basement".into())]
        );
        assert_eq!(reg.targets_of(other).count(), 0);

        reg.clear();
        assert!(reg.is_empty());
    }
}
