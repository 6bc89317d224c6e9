// readonly_sim/src/simulation/core/app_state.rs

use bevy::ecs::schedule::SystemSet;

/// System sets that order the bridge's work within a frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReadonlySet {
    /// Consume `ReadonlyRobot` requests and attach bridges.
    Attach,
    /// Sample and forward every attached bridge. Runs after `Attach`, so a robot
    /// spawned this frame reports on this frame's tick.
    Report,
}
