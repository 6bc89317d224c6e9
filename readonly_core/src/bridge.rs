// readonly_core/src/bridge.rs

//! The read-only robot bridge: one instance per simulated entity.
//!
//! Lifecycle:
//! 1. `attach` once, when the host spawns the entity. On success the bridge is ready.
//! 2. `on_tick` once per simulation step, in tick order.
//! 3. Drop with the entity. The endpoint registration is released then.

use crate::binding::bind_session;
use crate::error::BridgeError;
use crate::messages::Sample;
use crate::normalize::{engine_pose_to_report_pose, sim_time_seconds};
use crate::reporting::{ReportingHandle, ReportingSession};
use crate::transport::Transport;
use crate::types::{ComponentStore, FrameHandle, TickInfo};

#[derive(Debug)]
pub struct ReadonlyBridge {
    entity: FrameHandle,
    identifier: String,
    reporting: ReportingHandle,
}

impl ReadonlyBridge {
    /// Binds `session` to `entity` and opens its endpoint on `transport`.
    ///
    /// # Arguments
    /// * `entity`: The entity to track. Must exist in `store`.
    /// * `document`: Optional TOML text for the session's configuration.
    /// * `store`: Read-only view of the engine's components.
    /// * `session`: The reporting session, still holding its default identifier.
    /// * `transport`: Where the endpoint is registered.
    pub fn attach<S: ComponentStore + ?Sized>(
        entity: FrameHandle,
        document: Option<&str>,
        store: &S,
        mut session: Box<dyn ReportingSession>,
        transport: &Transport,
    ) -> Result<Self, BridgeError> {
        let identifier = bind_session(entity, document, store, session.as_mut())?;
        let reporting = ReportingHandle::open(session, transport)?;
        Ok(Self {
            entity,
            identifier,
            reporting,
        })
    }

    pub fn entity(&self) -> FrameHandle {
        self.entity
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Samples and forwards the bound entity's pose for one tick.
    ///
    /// Returns `Ok(None)` on a paused tick, without reading anything. A missing
    /// pose on a running tick is the host breaking its contract and is returned
    /// as an error rather than skipped.
    pub fn on_tick<S: ComponentStore + ?Sized>(
        &mut self,
        tick: &TickInfo,
        store: &S,
    ) -> Result<Option<Sample>, BridgeError> {
        if tick.paused {
            return Ok(None);
        }

        let engine_pose = store
            .pose(self.entity)
            .ok_or_else(|| BridgeError::MissingPose {
                entity: self.entity,
                identifier: self.identifier.clone(),
            })?;

        let sample = Sample {
            pose: engine_pose_to_report_pose(&engine_pose),
            sim_time_secs: sim_time_seconds(tick.sim_time),
        };

        self.reporting.service_inbound();
        self.reporting.forward(&sample)?;
        Ok(Some(sample))
    }
}
