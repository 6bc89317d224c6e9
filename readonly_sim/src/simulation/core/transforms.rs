// readonly_sim/src/simulation/core/transforms.rs

use bevy::prelude::{Quat as BevyQuat, Transform as BevyTransform, Vec3 as BevyVec3};
use nalgebra::{Isometry3, Quaternion, Translation3, UnitQuaternion};
use readonly_core::normalize::{engine_pose_to_report_pose, report_pose_to_engine_pose};
use readonly_core::prelude::{EnginePose, ReportPose};

// =========================================================================
// == Bevy <-> nalgebra (same frame, no axis swaps) ==
// =========================================================================

/// Converts a Bevy `Transform` into the core crate's engine pose.
/// This function does NOT handle ENU/Bevy coordinate system swaps; scale is dropped.
pub fn bevy_transform_to_engine_pose(transform: &BevyTransform) -> EnginePose {
    let t = transform.translation;
    let r = transform.rotation;
    Isometry3::from_parts(
        Translation3::new(t.x, t.y, t.z),
        // nalgebra Quaternion::new is w,x,y,z
        UnitQuaternion::from_quaternion(Quaternion::new(r.w, r.x, r.y, r.z)),
    )
}

/// Converts an engine pose back into a Bevy `Transform` with unit scale.
pub fn engine_pose_to_bevy_transform(pose: &EnginePose) -> BevyTransform {
    let t = pose.translation.vector;
    let r = pose.rotation.coords;
    BevyTransform {
        translation: BevyVec3::new(t.x, t.y, t.z),
        rotation: BevyQuat::from_xyzw(r.x, r.y, r.z, r.w),
        scale: BevyVec3::ONE,
    }
}

// =========================================================================
// == ENU <-> Bevy ==
// =========================================================================

/// Converts a Bevy Transform to a full pose (Isometry3) in the ENU frame.
pub fn bevy_transform_to_enu_iso(bevy_transform: &BevyTransform) -> ReportPose {
    engine_pose_to_report_pose(&bevy_transform_to_engine_pose(bevy_transform))
}

/// Converts a full pose (Isometry3) from ENU frame to Bevy Transform.
pub fn enu_iso_to_bevy_transform(enu_pose: &ReportPose) -> BevyTransform {
    engine_pose_to_bevy_transform(&report_pose_to_engine_pose(enu_pose))
}
