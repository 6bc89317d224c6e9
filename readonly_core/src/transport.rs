// readonly_core/src/transport.rs

//! In-process communication transport.
//!
//! A `Transport` is an explicit value shared by handle. Each bridge opens one
//! named `Endpoint` on it; the name stays registered until the endpoint is
//! dropped. Inbound traffic is queued per endpoint and drained without
//! blocking. Outbound reports from every endpoint land in one shared, bounded
//! queue that the fleet-manager side drains. With nobody draining, the oldest
//! report is dropped once the queue is full.

use crate::error::TransportError;
use crate::messages::{Envelope, RobotStateReport};
use async_channel::{Receiver, Sender};
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;
use tracing::{debug, trace};

/// Reports kept for the fleet-manager side before the oldest is dropped.
pub const DEFAULT_REPORT_CAPACITY: usize = 1024;

#[derive(Debug)]
struct Registry {
    /// Inbound queue senders, keyed by endpoint name.
    endpoints: DashMap<String, Sender<Envelope>>,
    reports_tx: Sender<RobotStateReport>,
    reports_rx: Receiver<RobotStateReport>,
}

#[derive(Clone, Debug)]
pub struct Transport {
    registry: Arc<Registry>,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    pub fn new() -> Self {
        Self::with_report_capacity(DEFAULT_REPORT_CAPACITY)
    }

    /// A transport whose outbound queue holds at most `capacity` reports (at least one).
    pub fn with_report_capacity(capacity: usize) -> Self {
        let (reports_tx, reports_rx) = async_channel::bounded(capacity.max(1));
        Self {
            registry: Arc::new(Registry {
                endpoints: DashMap::new(),
                reports_tx,
                reports_rx,
            }),
        }
    }

    /// Registers a new endpoint under `name`. Names are unique per transport.
    pub fn open(&self, name: &str) -> Result<Endpoint, TransportError> {
        if name.is_empty() {
            return Err(TransportError::EmptyName);
        }

        let (inbound_tx, inbound_rx) = async_channel::unbounded();
        match self.registry.endpoints.entry(name.to_owned()) {
            Entry::Occupied(_) => return Err(TransportError::DuplicateEndpoint(name.to_owned())),
            Entry::Vacant(slot) => {
                slot.insert(inbound_tx);
            }
        }
        debug!(endpoint = name, "registered endpoint");

        Ok(Endpoint {
            name: name.to_owned(),
            inbound: inbound_rx,
            registry: Arc::clone(&self.registry),
        })
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.endpoints.contains_key(name)
    }

    pub fn endpoint_count(&self) -> usize {
        self.registry.endpoints.len()
    }

    /// Queues inbound traffic for one endpoint. Never blocks.
    pub fn deliver(&self, name: &str, envelope: Envelope) -> Result<(), TransportError> {
        let sender = self
            .registry
            .endpoints
            .get(name)
            .ok_or_else(|| TransportError::UnknownEndpoint(name.to_owned()))?;
        sender
            .try_send(envelope)
            .map_err(|_| TransportError::Closed(name.to_owned()))
    }

    /// Queues a copy of `envelope` for every registered endpoint.
    /// Returns how many endpoints accepted it.
    pub fn broadcast(&self, envelope: &Envelope) -> usize {
        self.registry
            .endpoints
            .iter()
            .filter(|entry| entry.value().try_send(envelope.clone()).is_ok())
            .count()
    }

    /// Reports waiting to be drained.
    pub fn pending_reports(&self) -> usize {
        self.registry.reports_rx.len()
    }

    /// Takes every report still queued, oldest first.
    pub fn drain_reports(&self) -> Vec<RobotStateReport> {
        std::iter::from_fn(|| self.registry.reports_rx.try_recv().ok()).collect()
    }
}

/// A named endpoint exclusively owned by one bridge.
#[derive(Debug)]
pub struct Endpoint {
    name: String,
    inbound: Receiver<Envelope>,
    registry: Arc<Registry>,
}

impl Endpoint {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A cheap, cloneable handle for publishing reports under this endpoint's name.
    pub fn publisher(&self) -> Publisher {
        Publisher {
            source: self.name.clone(),
            sender: self.registry.reports_tx.clone(),
        }
    }

    /// Drains whatever inbound traffic is ready and returns immediately.
    pub fn spin_some(&self) -> Vec<Envelope> {
        std::iter::from_fn(|| self.inbound.try_recv().ok()).collect()
    }
}

impl Drop for Endpoint {
    fn drop(&mut self) {
        self.registry.endpoints.remove(&self.name);
        debug!(endpoint = %self.name, "released endpoint");
    }
}

#[derive(Clone, Debug)]
pub struct Publisher {
    source: String,
    sender: Sender<RobotStateReport>,
}

impl Publisher {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Queues `report` without blocking. A full queue drops its oldest report.
    pub fn publish(&self, report: RobotStateReport) -> Result<(), TransportError> {
        let displaced = self
            .sender
            .force_send(report)
            .map_err(|_| TransportError::Closed(self.source.clone()))?;
        if let Some(old) = displaced {
            trace!(source = %self.source, dropped_seq = old.seq, "report queue full");
        }
        Ok(())
    }
}
