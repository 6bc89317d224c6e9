// readonly_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::plugins::readonly::ReadonlyBridgePlugin;
use crate::simulation::plugins::world::spawner::ScenarioSpawnerPlugin;

// This prelude is for convenience for other files WITHIN the readonly_sim crate.
pub mod prelude;

pub mod cli;
pub mod simulation;

/// Brings together scenario spawning and read-only reporting.
/// Apps that spawn their own bodies only need `ReadonlyBridgePlugin`.
pub struct ReadonlySimulationPlugin;

impl Plugin for ReadonlySimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // Spawns the robots listed in the `ScenarioConfig` resource.
            ScenarioSpawnerPlugin,
            // Attaches a bridge to every `ReadonlyRobot` and reports it each frame.
            ReadonlyBridgePlugin,
        ));
    }
}
