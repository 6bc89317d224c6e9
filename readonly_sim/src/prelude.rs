// readonly_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the readonly_core prelude so the pure types (`ReadonlyBridge`,
// `Transport`, `ReportingSession`, ...) are one import away.
pub use readonly_core::prelude::*;

// Re-export common simulation-specific types.
pub use crate::simulation::config::{load_scenario, validate, RobotConfig, ScenarioConfig};
pub use crate::simulation::core::app_state::ReadonlySet;
pub use crate::simulation::core::components::{
    BridgeInstance, ReadonlyRobot, ReportingTransport, SessionFactory,
};
pub use crate::simulation::plugins::readonly::ReadonlyBridgePlugin;
pub use crate::simulation::plugins::world::spawner::ScenarioSpawnerPlugin;
pub use crate::ReadonlySimulationPlugin;
