// readonly_sim/src/simulation/core/components.rs

use bevy::prelude::{Component, Resource};
use readonly_core::prelude::{FleetStateReporter, ReadonlyBridge, ReportingSession, Transport};

// --- Request Components ---

/// Marks an entity that should be reported as a read-only robot.
///
/// The attach system consumes this request once: it is removed whether or not
/// attachment succeeds, so an entity is attached at most once.
#[derive(Component, Debug, Clone, Default)]
pub struct ReadonlyRobot {
    /// TOML text handed to the reporting session. `None` means an empty document.
    pub document: Option<String>,
}

impl ReadonlyRobot {
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
        }
    }
}

// --- Wrapper Components for Core Types ---

/// A Bevy component that wraps an attached core `ReadonlyBridge`.
/// Despawning the entity drops the bridge and releases its endpoint.
#[derive(Component, Debug)]
pub struct BridgeInstance(pub ReadonlyBridge);

// --- Resources ---

/// The transport every bridge in this app opens its endpoint on.
#[derive(Resource, Debug, Clone, Default)]
pub struct ReportingTransport(pub Transport);

/// Builds a fresh reporting session for each robot being attached.
#[derive(Resource)]
pub struct SessionFactory(pub Box<dyn Fn() -> Box<dyn ReportingSession> + Send + Sync>);

impl Default for SessionFactory {
    fn default() -> Self {
        Self(Box::new(|| -> Box<dyn ReportingSession> {
            Box::new(FleetStateReporter::default())
        }))
    }
}
