use crate::types::ReportPose;
use serde::{Deserialize, Serialize};

// =========================================================================
// == Per-Tick Data ==
// =========================================================================

/// One pose/time pair taken from the simulation on an active tick.
/// Built fresh every tick and never kept by the bridge.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// Pose of the bound entity in the ENU reporting frame.
    pub pose: ReportPose,
    /// Simulated time in whole seconds (truncated).
    pub sim_time_secs: u64,
}

// =========================================================================
// == Public API Messages (Transport Data) ==
// =========================================================================

/// A ground-plane position as fleet managers track it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

/// The state report a read-only robot publishes for the fleet manager.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RobotStateReport {
    pub name: String,
    pub model: String,
    pub fleet_name: String,
    pub level_name: String,
    pub sim_time_secs: u64,
    pub location: Location,
    /// Height above the level floor; dropped by planar consumers.
    pub elevation: f64,
    /// Monotonic per-robot sequence number, starting at zero.
    pub seq: u64,
}

/// Raw inbound traffic addressed to an endpoint (map updates, notices, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl Envelope {
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}
