//! Ownership of the scene's growth targets.

use ahash::AHashMap;
use tracing::debug;

use greenthumb_common::{EntityId, GardenError, GardenResult};

use crate::growth::GrowthTarget;

/// All growth targets in the scene, keyed by entity id.
///
/// Iteration follows insertion order.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: AHashMap<EntityId, GrowthTarget>,
    order: Vec<EntityId>,
}

impl TargetRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a target, returning its id. Replaces any target with the same id.
    pub fn insert(&mut self, target: GrowthTarget) -> EntityId {
        let id = target.id();
        if let Some(mut previous) = self.targets.insert(id, target) {
            previous.deactivate();
        } else {
            self.order.push(id);
        }
        id
    }

    /// Removes a target and cancels its deferred work.
    pub fn remove(&mut self, id: EntityId) -> Option<GrowthTarget> {
        let mut target = self.targets.remove(&id)?;
        self.order.retain(|other| *other != id);
        target.deactivate();
        debug!("Removed growth target {}", target.name());
        Some(target)
    }

    /// Gets a target.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&GrowthTarget> {
        self.targets.get(&id)
    }

    /// Gets a target mutably.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut GrowthTarget> {
        self.targets.get_mut(&id)
    }

    /// Gets a target mutably or reports it unknown.
    pub fn require_mut(&mut self, id: EntityId) -> GardenResult<&mut GrowthTarget> {
        self.targets
            .get_mut(&id)
            .ok_or(GardenError::UnknownTarget(id))
    }

    /// Checks if a target is registered.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.targets.contains_key(&id)
    }

    /// Number of targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Checks if there are no targets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[EntityId] {
        &self.order
    }

    /// Iterates over targets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &GrowthTarget> {
        self.order.iter().filter_map(|id| self.targets.get(id))
    }

    /// Whether every listed target exists and is complete.
    #[must_use]
    pub fn all_complete(&self, ids: &[EntityId]) -> bool {
        ids.iter()
            .all(|id| self.targets.get(id).is_some_and(GrowthTarget::is_complete))
    }

    /// Advances every target's deferred work.
    pub fn tick(&mut self, dt: f32) {
        for target in self.targets.values_mut() {
            target.tick(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::GrowthSettings;
    use crate::view::SharedToggle;

    fn target(name: &str) -> GrowthTarget {
        GrowthTarget::builder(name, GrowthSettings::default())
            .stage(SharedToggle::new())
            .stage(SharedToggle::new())
            .stage(SharedToggle::new())
            .build()
    }

    #[test]
    fn test_insert_and_iterate_in_order() {
        let mut registry = TargetRegistry::new();
        let a = registry.insert(target("a"));
        let b = registry.insert(target("b"));

        assert_eq!(registry.ids(), &[a, b]);
        let names: Vec<&str> = registry.iter().map(GrowthTarget::name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_remove_cancels_pending_popup() {
        let settings = GrowthSettings {
            transition_sprites: vec!["sprout".into()],
            ..GrowthSettings::default()
        };
        let plant = GrowthTarget::builder("a", settings)
            .stage(SharedToggle::new())
            .stage(SharedToggle::new())
            .stage(SharedToggle::new())
            .build();

        let mut registry = TargetRegistry::new();
        let id = registry.insert(plant);
        let plant = registry.get_mut(id).expect("registered");
        plant.start_pouring();
        plant.continue_pouring(2.0);
        assert!(plant.popups().pending_hide().is_some());

        let removed = registry.remove(id).expect("registered");
        assert_eq!(removed.popups().pending_hide(), None);
        assert!(registry.is_empty());
        assert!(matches!(
            registry.require_mut(id),
            Err(GardenError::UnknownTarget(_))
        ));
    }

    #[test]
    fn test_all_complete_requires_every_target() {
        let mut registry = TargetRegistry::new();
        let a = registry.insert(target("a"));
        let b = registry.insert(target("b"));

        for id in [a, b] {
            let plant = registry.get_mut(id).expect("registered");
            plant.start_pouring();
            plant.continue_pouring(2.0);
        }
        assert!(!registry.all_complete(&[a, b]));

        let plant = registry.get_mut(a).expect("registered");
        plant.continue_pouring(2.0);
        assert!(registry.all_complete(&[a]));
        assert!(!registry.all_complete(&[a, b]));
        assert!(!registry.all_complete(&[a, EntityId::NULL]));
    }
}
