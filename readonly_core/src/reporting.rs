// readonly_core/src/reporting.rs

use crate::config::ConfigDocument;
use crate::error::BridgeError;
use crate::messages::{Envelope, Sample};
use crate::transport::{Endpoint, Transport};
use crate::types::ReportPose;

// --- The Reporting Session Trait ("Contract") ---

/// The stateful collaborator that turns sampled poses into fleet-visible reports.
///
/// The bridge only decides *when* and *with what* to call it. Everything about
/// what a read-only robot report contains lives behind this trait.
pub trait ReportingSession: Send + Sync {
    /// The identifier the session currently reports under. Before
    /// `set_identifier` is called this is the session's default.
    fn identifier(&self) -> &str;

    fn set_identifier(&mut self, name: &str);

    /// Interprets the per-instance configuration document.
    fn read_configuration(&mut self, document: &ConfigDocument) -> Result<(), BridgeError>;

    /// Called once the endpoint for this robot exists.
    fn initialize(&mut self, endpoint: &Endpoint) -> Result<(), BridgeError>;

    /// Inbound traffic drained from the endpoint on an active tick.
    fn on_message(&mut self, _envelope: &Envelope) {}

    fn on_update(&mut self, pose: &ReportPose, sim_time_secs: u64) -> Result<(), BridgeError>;
}

/// Owns the communication endpoint and the session for one bridge instance.
pub struct ReportingHandle {
    // Declared first so the session is dropped before its endpoint is released.
    session: Box<dyn ReportingSession>,
    endpoint: Endpoint,
}

impl std::fmt::Debug for ReportingHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportingHandle")
            .field("endpoint", &self.endpoint)
            .field("identifier", &self.session.identifier())
            .finish()
    }
}

impl ReportingHandle {
    /// Opens the endpoint under the session's resolved identifier and initializes
    /// the session with it. Nothing stays registered if initialization fails.
    pub fn open(
        mut session: Box<dyn ReportingSession>,
        transport: &Transport,
    ) -> Result<Self, BridgeError> {
        let endpoint = transport.open(session.identifier())?;
        session.initialize(&endpoint)?;
        Ok(Self { session, endpoint })
    }

    pub fn identifier(&self) -> &str {
        self.endpoint.name()
    }

    /// Drains ready inbound traffic into the session. Returns how many envelopes were handled.
    pub fn service_inbound(&mut self) -> usize {
        let envelopes = self.endpoint.spin_some();
        for envelope in &envelopes {
            self.session.on_message(envelope);
        }
        envelopes.len()
    }

    pub fn forward(&mut self, sample: &Sample) -> Result<(), BridgeError> {
        self.session.on_update(&sample.pose, sample.sim_time_secs)
    }
}
