// readonly_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::reporting::{ReportingHandle, ReportingSession};
pub use crate::types::{ComponentStore, EnginePose, FrameHandle, ReportPose, TickInfo};

// --- Core Data Structures ---
pub use crate::config::ConfigDocument;
pub use crate::error::{BridgeError, TransportError};
pub use crate::messages::{Envelope, Location, RobotStateReport, Sample};
pub use crate::transport::{Endpoint, Publisher, Transport};

// --- The Bridge and its Reference Session ---
pub use crate::bridge::ReadonlyBridge;
pub use crate::reporter::{FleetStateReporter, ReporterSettings};
