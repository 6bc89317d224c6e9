// readonly_core/src/error.rs

use crate::types::FrameHandle;
use thiserror::Error;

/// Failures while binding a bridge to an entity or while driving a tick.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The host asked to attach to an entity the store does not know.
    #[error("entity {0:?} does not exist in the component store")]
    UnknownEntity(FrameHandle),

    /// The per-instance configuration document could not be parsed.
    #[error("failed to parse bridge configuration document: {0}")]
    Configuration(#[from] figment::Error),

    /// The document parsed but the reporting session rejected its contents.
    #[error("invalid bridge configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The bound entity lost its pose component while the simulation was running.
    #[error("bound entity {entity:?} ('{identifier}') has no pose component")]
    MissingPose {
        entity: FrameHandle,
        identifier: String,
    },

    #[error("tick rate must be greater than zero")]
    InvalidTickRate,
}

/// Failures of the in-process communication transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("endpoint name must not be empty")]
    EmptyName,

    #[error("an endpoint named '{0}' is already registered")]
    DuplicateEndpoint(String),

    #[error("no endpoint named '{0}' is registered")]
    UnknownEndpoint(String),

    #[error("channel for '{0}' is closed")]
    Closed(String),
}
