// readonly_sim/src/simulation/plugins/readonly/mod.rs

use bevy::prelude::*;

use crate::simulation::core::{
    app_state::ReadonlySet,
    components::{ReportingTransport, SessionFactory},
};

mod systems;

pub use systems::{attach_readonly_bridges, readonly_tick_system};

/// Reports every entity carrying a `ReadonlyRobot` request as a read-only robot.
///
/// Both systems run in `PreUpdate`, ahead of any gameplay or physics that moves
/// the body this frame, so a report reflects the pose the previous frame left.
pub struct ReadonlyBridgePlugin;

impl Plugin for ReadonlyBridgePlugin {
    fn build(&self, app: &mut App) {
        app
            // Keep resources the app inserted before us (custom sessions, shared transport).
            .init_resource::<ReportingTransport>()
            .init_resource::<SessionFactory>()
            .configure_sets(PreUpdate, (ReadonlySet::Attach, ReadonlySet::Report).chain())
            .add_systems(
                PreUpdate,
                (
                    attach_readonly_bridges.in_set(ReadonlySet::Attach),
                    readonly_tick_system.in_set(ReadonlySet::Report),
                ),
            );
    }
}
