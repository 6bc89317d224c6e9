// readonly_core/src/reporter.rs

use crate::config::ConfigDocument;
use crate::error::BridgeError;
use crate::messages::{Envelope, RobotStateReport};
use crate::normalize::planar_location;
use crate::reporting::ReportingSession;
use crate::transport::{Endpoint, Publisher};
use crate::types::ReportPose;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

pub const DEFAULT_IDENTIFIER: &str = "readonly_robot";

fn default_level_name() -> String {
    "L1".to_string()
}

/// Settings read from the per-instance configuration document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReporterSettings {
    pub fleet_name: String,
    #[serde(default)]
    pub robot_model: String,
    #[serde(default = "default_level_name")]
    pub level_name: String,
}

/// A reporting session that publishes one `RobotStateReport` per update.
#[derive(Debug)]
pub struct FleetStateReporter {
    name: String,
    settings: Option<ReporterSettings>,
    publisher: Option<Publisher>,
    seq: u64,
    /// Inbound envelopes seen so far, by topic.
    inbound_counts: HashMap<String, usize>,
}

impl Default for FleetStateReporter {
    fn default() -> Self {
        Self {
            name: DEFAULT_IDENTIFIER.to_string(),
            settings: None,
            publisher: None,
            seq: 0,
            inbound_counts: HashMap::new(),
        }
    }
}

impl FleetStateReporter {
    pub fn settings(&self) -> Option<&ReporterSettings> {
        self.settings.as_ref()
    }

    pub fn inbound_count(&self, topic: &str) -> usize {
        self.inbound_counts.get(topic).copied().unwrap_or(0)
    }

    fn build_report(
        &self,
        settings: &ReporterSettings,
        pose: &ReportPose,
        sim_time_secs: u64,
    ) -> RobotStateReport {
        RobotStateReport {
            name: self.name.clone(),
            model: settings.robot_model.clone(),
            fleet_name: settings.fleet_name.clone(),
            level_name: settings.level_name.clone(),
            sim_time_secs,
            location: planar_location(pose),
            elevation: pose.translation.z,
            seq: self.seq,
        }
    }
}

impl ReportingSession for FleetStateReporter {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn set_identifier(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn read_configuration(&mut self, document: &ConfigDocument) -> Result<(), BridgeError> {
        let settings: ReporterSettings = document.extract().map_err(|e| {
            BridgeError::InvalidConfiguration(format!("robot '{}': {}", self.name, e))
        })?;
        if settings.fleet_name.trim().is_empty() {
            return Err(BridgeError::InvalidConfiguration(format!(
                "robot '{}': fleet_name must not be empty",
                self.name
            )));
        }
        self.settings = Some(settings);
        Ok(())
    }

    fn initialize(&mut self, endpoint: &Endpoint) -> Result<(), BridgeError> {
        if self.settings.is_none() {
            return Err(BridgeError::InvalidConfiguration(format!(
                "robot '{}': initialized before configuration was read",
                self.name
            )));
        }
        self.publisher = Some(endpoint.publisher());
        Ok(())
    }

    fn on_message(&mut self, envelope: &Envelope) {
        debug!(
            robot = %self.name,
            topic = %envelope.topic,
            bytes = envelope.payload.len(),
            "inbound traffic"
        );
        *self.inbound_counts.entry(envelope.topic.clone()).or_insert(0) += 1;
    }

    fn on_update(&mut self, pose: &ReportPose, sim_time_secs: u64) -> Result<(), BridgeError> {
        let (Some(settings), Some(publisher)) = (self.settings.as_ref(), self.publisher.as_ref())
        else {
            return Err(BridgeError::InvalidConfiguration(format!(
                "robot '{}': updated before initialization",
                self.name
            )));
        };

        let report = self.build_report(settings, pose, sim_time_secs);
        // Publishing failures belong to the transport; the tick carries on.
        if let Err(e) = publisher.publish(report) {
            warn!(robot = %self.name, "failed to publish state report: {}", e);
        }
        self.seq += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Transport;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
    use std::f64::consts::FRAC_PI_2;

    fn configured(document: &str) -> FleetStateReporter {
        let mut reporter = FleetStateReporter::default();
        reporter
            .read_configuration(&ConfigDocument::parse(Some(document)).unwrap())
            .unwrap();
        reporter
    }

    #[test]
    fn settings_fill_defaults() {
        let reporter = configured("fleet_name = \"caddy\"");
        assert_eq!(
            reporter.settings(),
            Some(&ReporterSettings {
                fleet_name: "caddy".into(),
                robot_model: String::new(),
                level_name: "L1".into(),
            })
        );
        assert_eq!(reporter.identifier(), DEFAULT_IDENTIFIER);
    }

    #[test]
    fn missing_fleet_name_or_unknown_keys_are_rejected() {
        let mut reporter = FleetStateReporter::default();
        assert!(reporter
            .read_configuration(&ConfigDocument::default())
            .is_err());
        assert!(reporter
            .read_configuration(&ConfigDocument::parse(Some("fleet_name = \"\"")).unwrap())
            .is_err());
        assert!(reporter
            .read_configuration(
                &ConfigDocument::parse(Some("fleet_name = \"a\"\nspeed = 3")).unwrap()
            )
            .is_err());
    }

    #[test]
    fn update_before_initialize_is_an_error() {
        let mut reporter = configured("fleet_name = \"caddy\"");
        assert!(reporter.on_update(&Isometry3::identity(), 0).is_err());
    }

    #[test]
    fn publishes_planar_reports_with_increasing_seq() {
        let transport = Transport::new();
        let mut reporter =
            configured("fleet_name = \"caddy\"\nrobot_model = \"tug\"\nlevel_name = \"L3\"");
        reporter.set_identifier("robot_7");
        let endpoint = transport.open("robot_7").unwrap();
        reporter.initialize(&endpoint).unwrap();

        let pose = Isometry3::from_parts(
            Translation3::new(1.0, 2.0, 0.25),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
        );
        reporter.on_update(&pose, 5).unwrap();
        reporter.on_update(&pose, 6).unwrap();

        let reports = transport.drain_reports();
        assert_eq!(reports.len(), 2);
        let first = &reports[0];
        assert_eq!(first.name, "robot_7");
        assert_eq!(first.model, "tug");
        assert_eq!(first.fleet_name, "caddy");
        assert_eq!(first.level_name, "L3");
        assert_eq!(first.sim_time_secs, 5);
        assert_eq!(first.seq, 0);
        assert_abs_diff_eq!(first.location.x, 1.0);
        assert_abs_diff_eq!(first.location.y, 2.0);
        assert_abs_diff_eq!(first.location.yaw, FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(first.elevation, 0.25);
        assert_eq!(reports[1].seq, 1);
    }

    #[test]
    fn reports_without_a_consumer_stay_bounded() {
        let transport = Transport::with_report_capacity(8);
        let mut reporter = configured("fleet_name = \"caddy\"");
        let endpoint = transport.open(reporter.identifier()).unwrap();
        reporter.initialize(&endpoint).unwrap();

        for secs in 0..1_000 {
            reporter.on_update(&Isometry3::identity(), secs).unwrap();
        }

        assert_eq!(transport.pending_reports(), 8);
        let reports = transport.drain_reports();
        assert_eq!(reports.last().map(|r| r.seq), Some(999));
    }

    #[test]
    fn counts_inbound_topics() {
        let mut reporter = FleetStateReporter::default();
        reporter.on_message(&Envelope::new("building_map", Vec::new()));
        reporter.on_message(&Envelope::new("building_map", Vec::new()));
        assert_eq!(reporter.inbound_count("building_map"), 2);
        assert_eq!(reporter.inbound_count("other"), 0);
    }
}
