// readonly_sim/src/simulation/core/store.rs

use bevy::prelude::{Name, Query, Transform};
use readonly_core::prelude::{ComponentStore, EnginePose, FrameHandle};

use super::transforms::bevy_transform_to_engine_pose;

/// The query a bridge system needs to look at its bound entity.
/// Every entity matches it, so `contains` doubles as a liveness check.
pub type StoreQuery<'w, 's> = Query<'w, 's, (Option<&'static Name>, Option<&'static Transform>)>;

/// Exposes the Bevy world to the core bridge through `ComponentStore`.
///
/// The pose is the entity's local `Transform`. Tracked robots are expected to be
/// top-level entities, where local and world pose coincide.
pub struct EcsComponentStore<'a, 'w, 's> {
    query: &'a StoreQuery<'w, 's>,
}

impl<'a, 'w, 's> EcsComponentStore<'a, 'w, 's> {
    pub fn new(query: &'a StoreQuery<'w, 's>) -> Self {
        Self { query }
    }
}

impl ComponentStore for EcsComponentStore<'_, '_, '_> {
    fn contains(&self, entity: FrameHandle) -> bool {
        self.query.contains(entity.to_entity())
    }

    fn name(&self, entity: FrameHandle) -> Option<String> {
        let (name, _) = self.query.get(entity.to_entity()).ok()?;
        name.map(|n| n.as_str().to_owned())
    }

    fn pose(&self, entity: FrameHandle) -> Option<EnginePose> {
        let (_, transform) = self.query.get(entity.to_entity()).ok()?;
        transform.map(bevy_transform_to_engine_pose)
    }
}
