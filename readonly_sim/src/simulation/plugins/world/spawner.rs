// readonly_sim/src/simulation/plugins/world/spawner.rs

use bevy::prelude::*;

use crate::simulation::config::ScenarioConfig;
use crate::simulation::core::components::ReadonlyRobot;

/// Spawns the scenario's robots as free-roaming bodies with a `ReadonlyRobot` request.
pub struct ScenarioSpawnerPlugin;

impl Plugin for ScenarioSpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_scenario_robots);
    }
}

fn spawn_scenario_robots(mut commands: Commands, scenario: Option<Res<ScenarioConfig>>) {
    let Some(scenario) = scenario else {
        warn!("[SPAWN] No ScenarioConfig resource found, no robots will be spawned.");
        return;
    };

    for (index, robot) in scenario.robots.iter().enumerate() {
        let document = match robot.bridge_document() {
            Ok(document) => document,
            Err(e) => {
                error!(
                    "[SPAWN] Failed to render bridge table for robot #{}: {}. Skipping robot.",
                    index, e
                );
                continue;
            }
        };

        let label = robot.name.as_deref().unwrap_or("<unnamed>");
        info!("[SPAWN] Spawning read-only robot '{}'", label);

        let mut entity_commands = commands.spawn((
            robot.starting_pose.to_bevy_transform(),
            ReadonlyRobot { document },
        ));
        if let Some(name) = &robot.name {
            entity_commands.insert(Name::new(name.clone()));
        }
    }
}
