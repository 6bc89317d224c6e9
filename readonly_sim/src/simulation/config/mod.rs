// readonly_sim/src/simulation/config/mod.rs

//! This module handles loading scenario configuration from disk.

mod serde_helpers;

pub mod structs;

use bevy::prelude::*;
use figment::{
    providers::{Format, Toml},
    Figment,
};
use std::path::Path;

pub use structs::{Pose, RobotConfig, ScenarioConfig, SimulationSettings};

/// Loads and validates a scenario file.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig, figment::Error> {
    // figment treats a missing file as empty, which would silently run nothing.
    if !path.exists() {
        return Err(format!("scenario file not found at {}", path.display()).into());
    }
    info!("Loading scenario from: {}", path.display());
    let scenario: ScenarioConfig = Figment::new().merge(Toml::file(path)).extract()?;
    validate(&scenario)?;
    Ok(scenario)
}

/// Parses a scenario from TOML text.
pub fn scenario_from_str(text: &str) -> Result<ScenarioConfig, figment::Error> {
    let scenario: ScenarioConfig = Figment::new().merge(Toml::string(text)).extract()?;
    validate(&scenario)?;
    Ok(scenario)
}

/// Checks the settings a run depends on. Comparisons are written so NaN fails them.
pub fn validate(scenario: &ScenarioConfig) -> Result<(), figment::Error> {
    let settings = &scenario.simulation;
    if !(settings.tick_rate_hz > 0.0 && settings.tick_rate_hz.is_finite()) {
        return Err(String::from("simulation.tick_rate_hz must be positive and finite").into());
    }
    if !(settings.duration_seconds > 0.0 && settings.duration_seconds.is_finite()) {
        return Err(String::from("simulation.duration_seconds must be positive and finite").into());
    }
    if let Some(pause_after) = settings.pause_after_seconds {
        if !(pause_after >= 0.0 && pause_after.is_finite()) {
            return Err(String::from(
                "simulation.pause_after_seconds must be non-negative and finite",
            )
            .into());
        }
    }
    if !(settings.pause_duration_seconds >= 0.0 && settings.pause_duration_seconds.is_finite()) {
        return Err(String::from(
            "simulation.pause_duration_seconds must be non-negative and finite",
        )
        .into());
    }
    Ok(())
}
