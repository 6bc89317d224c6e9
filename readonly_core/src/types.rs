// readonly_core/src/types.rs

use nalgebra::Isometry3;
use std::time::Duration;

// --- Pose Aliases ---

/// A rigid pose in the simulation engine's native frame: Y-up, right-handed,
/// with -Z pointing north. Single precision, as the engine stores it.
pub type EnginePose = Isometry3<f32>;

/// A rigid pose in the reporting frame: ENU (X east, Y north, Z up), double precision.
pub type ReportPose = Isometry3<f64>;

// --- Core Identifier ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameHandle(pub u64);

impl FrameHandle {
    // A convenience method for use in the Bevy adapter crate.
    #[cfg(feature = "bevy")] // This will only compile if the "bevy" feature is enabled
    pub fn from_entity(entity: bevy_ecs::prelude::Entity) -> Self {
        Self(entity.to_bits())
    }

    #[cfg(feature = "bevy")]
    pub fn to_entity(self) -> bevy_ecs::prelude::Entity {
        bevy_ecs::prelude::Entity::from_bits(self.0)
    }
}

/// What the host engine tells the bridge about the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickInfo {
    /// Total simulated time since the simulation started.
    pub sim_time: Duration,
    /// Whether the simulation is frozen for this tick.
    pub paused: bool,
}

impl TickInfo {
    pub fn running(sim_time: Duration) -> Self {
        Self {
            sim_time,
            paused: false,
        }
    }

    pub fn paused(sim_time: Duration) -> Self {
        Self {
            sim_time,
            paused: true,
        }
    }
}

// --- Core Trait for Component Lookups ---

/// Read-only view of the engine's entity/component storage.
///
/// The bridge never mutates the store. Adapters implement this over whatever
/// the host keeps (Bevy queries, a test map, ...).
pub trait ComponentStore {
    /// Whether `entity` is alive in the store.
    fn contains(&self, entity: FrameHandle) -> bool;

    /// The entity's declared name component, if it has one. An empty or
    /// whitespace-only name is treated as absent and the session default is used.
    fn name(&self, entity: FrameHandle) -> Option<String>;

    /// The entity's current pose component in the engine frame.
    fn pose(&self, entity: FrameHandle) -> Option<EnginePose>;
}
