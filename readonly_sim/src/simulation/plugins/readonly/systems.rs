// readonly_sim/src/simulation/plugins/readonly/systems.rs

use bevy::ecs::error::BevyError;
use bevy::prelude::*;
use readonly_core::prelude::{FrameHandle, ReadonlyBridge, TickInfo};

use crate::simulation::core::{
    components::{BridgeInstance, ReadonlyRobot, ReportingTransport, SessionFactory},
    store::{EcsComponentStore, StoreQuery},
};

// =========================================================================
// == Attachment ==
// =========================================================================

/// Consumes `ReadonlyRobot` requests and attaches one bridge per entity.
///
/// A failed attachment is logged and the request is dropped, so the entity is
/// never tracked in a half-initialized state.
pub fn attach_readonly_bridges(
    mut commands: Commands,
    requests: Query<(Entity, &ReadonlyRobot), Without<BridgeInstance>>,
    store: StoreQuery,
    transport: Res<ReportingTransport>,
    factory: Res<SessionFactory>,
) {
    let store = EcsComponentStore::new(&store);

    for (entity, request) in &requests {
        let attached = ReadonlyBridge::attach(
            FrameHandle::from_entity(entity),
            request.document.as_deref(),
            &store,
            (factory.0)(),
            &transport.0,
        );

        let mut entity_commands = commands.entity(entity);
        entity_commands.remove::<ReadonlyRobot>();
        match attached {
            Ok(bridge) => {
                info!(
                    "[READONLY] Attached bridge '{}' to {:?}",
                    bridge.identifier(),
                    entity
                );
                entity_commands.insert(BridgeInstance(bridge));
            }
            Err(e) => {
                error!(
                    "[READONLY] Failed to attach bridge to {:?}: {}. Entity will not be reported.",
                    entity, e
                );
            }
        }
    }
}

// =========================================================================
// == Runtime System ==
// =========================================================================

/// Runs every frame and drives each attached bridge for one tick.
///
/// A paused virtual clock turns every bridge into a no-op. Tick errors are
/// returned to Bevy's error handler rather than swallowed.
pub fn readonly_tick_system(
    time: Res<Time<Virtual>>,
    mut bridges: Query<&mut BridgeInstance>,
    store: StoreQuery,
) -> Result<(), BevyError> {
    let tick = TickInfo {
        sim_time: time.elapsed(),
        paused: time.is_paused(),
    };
    let store = EcsComponentStore::new(&store);

    for mut bridge in &mut bridges {
        bridge.0.on_tick(&tick, &store)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::plugins::readonly::ReadonlyBridgePlugin;
    use approx::assert_abs_diff_eq;
    use readonly_core::prelude::{
        BridgeError, ConfigDocument, Endpoint, Envelope, ReportPose, ReportingSession,
        RobotStateReport, Transport,
    };
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const CADDY: &str = "fleet_name = \"caddy\"";

    fn test_app() -> App {
        let mut app = App::new();
        // No TimePlugin: tests move the virtual clock by hand.
        app.init_resource::<Time<Virtual>>();
        app.add_plugins(ReadonlyBridgePlugin);
        app
    }

    fn transport(app: &App) -> Transport {
        app.world().resource::<ReportingTransport>().0.clone()
    }

    fn advance(app: &mut App, delta: Duration) {
        app.world_mut()
            .resource_mut::<Time<Virtual>>()
            .advance_by(delta);
    }

    fn reports(app: &App) -> Vec<RobotStateReport> {
        transport(app).drain_reports()
    }

    #[test]
    fn first_running_frame_reports_enu_pose_and_whole_seconds() {
        let mut app = test_app();
        let entity = app
            .world_mut()
            .spawn((
                Name::new("robot_7"),
                // ENU (1, 2, 0), yaw 0.
                Transform::from_xyz(1.0, 0.0, -2.0),
                ReadonlyRobot::with_document(CADDY),
            ))
            .id();

        advance(&mut app, Duration::from_millis(5400));
        app.update();

        assert!(app.world().get::<BridgeInstance>(entity).is_some());
        assert!(app.world().get::<ReadonlyRobot>(entity).is_none());

        let reports = reports(&app);
        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.name, "robot_7");
        assert_eq!(report.fleet_name, "caddy");
        assert_eq!(report.sim_time_secs, 5);
        assert_abs_diff_eq!(report.location.x, 1.0);
        assert_abs_diff_eq!(report.location.y, 2.0);
        assert_abs_diff_eq!(report.location.yaw, 0.0);
        assert_abs_diff_eq!(report.elevation, 0.0);
    }

    #[test]
    fn paused_clock_produces_no_reports() {
        let mut app = test_app();
        app.world_mut().spawn((
            Name::new("robot_7"),
            Transform::default(),
            ReadonlyRobot::with_document(CADDY),
        ));
        app.world_mut().resource_mut::<Time<Virtual>>().pause();

        for _ in 0..3 {
            app.update();
        }
        assert!(reports(&app).is_empty());
        // Attachment still happened while paused.
        assert!(transport(&app).is_registered("robot_7"));

        app.world_mut().resource_mut::<Time<Virtual>>().unpause();
        advance(&mut app, Duration::from_secs(1));
        app.update();
        assert_eq!(reports(&app).len(), 1);
    }

    #[test]
    fn one_report_per_frame_with_non_decreasing_time() {
        let mut app = test_app();
        app.world_mut().spawn((
            Name::new("robot_7"),
            Transform::default(),
            ReadonlyRobot::with_document(CADDY),
        ));

        for _ in 0..6 {
            advance(&mut app, Duration::from_millis(450));
            app.update();
        }

        let times: Vec<u64> = reports(&app).iter().map(|r| r.sim_time_secs).collect();
        assert_eq!(times, vec![0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn unnamed_entity_reports_under_default_identifier() {
        let mut app = test_app();
        app.world_mut()
            .spawn((Transform::default(), ReadonlyRobot::with_document(CADDY)));
        app.update();

        let reports = reports(&app);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].name, readonly_core::reporter::DEFAULT_IDENTIFIER);
    }

    #[test]
    fn malformed_document_leaves_entity_untracked() {
        let mut app = test_app();
        let entity = app
            .world_mut()
            .spawn((
                Name::new("robot_7"),
                Transform::default(),
                ReadonlyRobot::with_document("fleet_name = "),
            ))
            .id();
        app.update();

        assert!(app.world().get::<BridgeInstance>(entity).is_none());
        assert!(app.world().get::<ReadonlyRobot>(entity).is_none());
        assert_eq!(transport(&app).endpoint_count(), 0);
        assert!(reports(&app).is_empty());
    }

    #[test]
    fn duplicate_names_attach_only_once() {
        let mut app = test_app();
        for _ in 0..2 {
            app.world_mut().spawn((
                Name::new("robot_7"),
                Transform::default(),
                ReadonlyRobot::with_document(CADDY),
            ));
        }
        app.update();

        let mut bridges = app.world_mut().query::<&BridgeInstance>();
        assert_eq!(bridges.iter(app.world()).count(), 1);
        assert_eq!(reports(&app).len(), 1);
    }

    /// Records the topics it sees; reports nothing.
    struct TopicRecorder {
        name: String,
        topics: Arc<Mutex<Vec<String>>>,
    }

    impl ReportingSession for TopicRecorder {
        fn identifier(&self) -> &str {
            &self.name
        }

        fn set_identifier(&mut self, name: &str) {
            self.name = name.to_owned();
        }

        fn read_configuration(&mut self, _document: &ConfigDocument) -> Result<(), BridgeError> {
            Ok(())
        }

        fn initialize(&mut self, _endpoint: &Endpoint) -> Result<(), BridgeError> {
            Ok(())
        }

        fn on_message(&mut self, envelope: &Envelope) {
            self.topics.lock().unwrap().push(envelope.topic.clone());
        }

        fn on_update(&mut self, _pose: &ReportPose, _sim_time_secs: u64) -> Result<(), BridgeError> {
            Ok(())
        }
    }

    #[test]
    fn custom_session_factory_receives_inbound_traffic() {
        let topics = Arc::new(Mutex::new(Vec::new()));
        let factory_topics = Arc::clone(&topics);

        let mut app = App::new();
        app.init_resource::<Time<Virtual>>();
        app.insert_resource(SessionFactory(Box::new(move || -> Box<dyn ReportingSession> {
            Box::new(TopicRecorder {
                name: "recorder".into(),
                topics: Arc::clone(&factory_topics),
            })
        })));
        app.add_plugins(ReadonlyBridgePlugin);

        app.world_mut()
            .spawn((Transform::default(), ReadonlyRobot::default()));
        app.update();
        assert!(transport(&app).is_registered("recorder"));

        transport(&app)
            .deliver("recorder", Envelope::new("building_map", Vec::new()))
            .unwrap();

        app.world_mut().resource_mut::<Time<Virtual>>().pause();
        app.update();
        assert!(topics.lock().unwrap().is_empty());

        app.world_mut().resource_mut::<Time<Virtual>>().unpause();
        app.update();
        assert_eq!(*topics.lock().unwrap(), vec!["building_map".to_owned()]);
    }

    #[test]
    fn despawning_releases_the_endpoint() {
        let mut app = test_app();
        let entity = app
            .world_mut()
            .spawn((
                Name::new("robot_7"),
                Transform::default(),
                ReadonlyRobot::with_document(CADDY),
            ))
            .id();
        app.update();
        assert!(transport(&app).is_registered("robot_7"));

        app.world_mut().despawn(entity);
        assert!(!transport(&app).is_registered("robot_7"));
    }
}
