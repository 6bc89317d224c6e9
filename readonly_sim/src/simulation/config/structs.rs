// readonly_sim/src/simulation/config/structs.rs

use bevy::prelude::{Resource, Transform};
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use serde::Deserialize;

use super::serde_helpers;
use crate::simulation::core::transforms::enu_iso_to_bevy_transform;

// =========================================================================
// == Top-Level Configuration Resource ==
// =========================================================================

/// # ScenarioConfig
/// The Bevy resource describing which read-only robots to spawn and how long to run.
/// This struct is the root of the data parsed from a `scenario.toml` file.
#[derive(Resource, Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: SimulationSettings,

    // The TOML has `[[robots]]`, which becomes a Vec of RobotConfig structs.
    #[serde(default)]
    pub robots: Vec<RobotConfig>,
}

// =========================================================================
// == Configuration Sub-Structs ==
// =========================================================================

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SimulationSettings {
    /// Virtual seconds to simulate before exiting.
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: f32,
    /// How often the schedule runner ticks, in Hz.
    #[serde(default = "default_tick_rate_hz")]
    pub tick_rate_hz: f64,
    /// Freeze the virtual clock once it reaches this many seconds.
    #[serde(default)]
    pub pause_after_seconds: Option<f32>,
    /// Wall-clock seconds to stay frozen before resuming.
    #[serde(default = "default_pause_duration_seconds")]
    pub pause_duration_seconds: f32,
}

fn default_duration_seconds() -> f32 {
    10.0
}

fn default_tick_rate_hz() -> f64 {
    20.0
}

fn default_pause_duration_seconds() -> f32 {
    2.0
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            duration_seconds: default_duration_seconds(),
            tick_rate_hz: default_tick_rate_hz(),
            pause_after_seconds: None,
            pause_duration_seconds: default_pause_duration_seconds(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct RobotConfig {
    /// Becomes the entity's `Name`. Unnamed robots report under the session default.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub starting_pose: Pose,
    /// The per-instance document, forwarded verbatim to the reporting session.
    #[serde(default)]
    pub bridge: Option<toml::Table>,
}

impl RobotConfig {
    /// Renders the `bridge` table back into TOML text for the bridge to parse.
    pub fn bridge_document(&self) -> Result<Option<String>, toml::ser::Error> {
        self.bridge.as_ref().map(toml::to_string).transpose()
    }
}

// =========================================================================
// == Helper Structs for Nested Configuration ==
// =========================================================================

/// A pose in ENU, as written in scenario files.
#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct Pose {
    #[serde(with = "serde_helpers::vec3_f64_from_array", default)]
    pub translation: Vector3<f64>,

    #[serde(with = "serde_helpers::quat_f64_from_euler_deg", default)]
    pub rotation: UnitQuaternion<f64>,
}

impl Pose {
    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.translation), self.rotation)
    }

    pub fn to_bevy_transform(&self) -> Transform {
        enu_iso_to_bevy_transform(&self.to_isometry())
    }
}
