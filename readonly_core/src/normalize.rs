// readonly_core/src/normalize.rs

//! Conversions from the engine's native pose and clock into what reports carry.
//!
//! The engine frame is Y-up (X east, Y up, -Z north). The report frame is ENU.
//! The frame change is a +90 degree rotation about X, so a vector maps as
//! `(x, y, z) -> (x, -z, y)`. Conjugating an orientation by that rotation is the
//! same permutation applied to the quaternion's vector part, with `w` unchanged.
//! Only sign flips and f32 -> f64 widening are involved, so the engine -> report
//! direction is exact.

use crate::error::BridgeError;
use crate::messages::Location;
use crate::types::{EnginePose, ReportPose};
use nalgebra::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3};
use std::time::Duration;

// =========================================================================
// == Pose ==
// =========================================================================

/// Converts a vector expressed in the engine frame into ENU.
pub fn engine_vector_to_enu(v: &Vector3<f32>) -> Vector3<f64> {
    Vector3::new(
        v.x as f64,  // Engine X -> ENU East
        -v.z as f64, // Engine -Z -> ENU North
        v.y as f64,  // Engine Y -> ENU Up
    )
}

/// Converts an ENU vector into the engine frame.
pub fn enu_vector_to_engine(v: &Vector3<f64>) -> Vector3<f32> {
    Vector3::new(
        v.x as f32,  // East -> Engine X
        v.z as f32,  // Up -> Engine Y
        -v.y as f32, // North -> Engine -Z
    )
}

/// Converts an object's orientation from the engine frame into ENU.
pub fn engine_quat_to_enu(q: &UnitQuaternion<f32>) -> UnitQuaternion<f64> {
    let c = q.coords; // [x, y, z, w]
    let v = engine_vector_to_enu(&Vector3::new(c.x, c.y, c.z));
    // The input is already unit length and the permutation preserves the norm.
    UnitQuaternion::new_unchecked(Quaternion::new(c.w as f64, v.x, v.y, v.z))
}

/// Converts an object's orientation from ENU into the engine frame.
pub fn enu_quat_to_engine(q: &UnitQuaternion<f64>) -> UnitQuaternion<f32> {
    let c = q.coords;
    let v = enu_vector_to_engine(&Vector3::new(c.x, c.y, c.z));
    UnitQuaternion::new_normalize(Quaternion::new(c.w as f32, v.x, v.y, v.z))
}

/// Maps the engine's native rigid transform into the reporting frame.
pub fn engine_pose_to_report_pose(pose: &EnginePose) -> ReportPose {
    Isometry3::from_parts(
        Translation3::from(engine_vector_to_enu(&pose.translation.vector)),
        engine_quat_to_enu(&pose.rotation),
    )
}

/// Inverse of [`engine_pose_to_report_pose`], used when spawning bodies from ENU poses.
pub fn report_pose_to_engine_pose(pose: &ReportPose) -> EnginePose {
    Isometry3::from_parts(
        Translation3::from(enu_vector_to_engine(&pose.translation.vector)),
        enu_quat_to_engine(&pose.rotation),
    )
}

/// Projects an ENU pose onto the ground plane.
pub fn planar_location(pose: &ReportPose) -> Location {
    let (_, _, yaw) = pose.rotation.euler_angles();
    Location {
        x: pose.translation.x,
        y: pose.translation.y,
        yaw,
    }
}

// =========================================================================
// == Time ==
// =========================================================================

/// Whole simulated seconds, truncating any sub-second part.
pub fn sim_time_seconds(elapsed: Duration) -> u64 {
    elapsed.as_secs()
}

/// Truncating division for hosts that count integer ticks instead of durations.
pub fn ticks_to_seconds(ticks: u64, ticks_per_second: u64) -> Result<u64, BridgeError> {
    if ticks_per_second == 0 {
        return Err(BridgeError::InvalidTickRate);
    }
    Ok(ticks / ticks_per_second)
}
