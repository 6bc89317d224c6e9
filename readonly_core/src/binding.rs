// readonly_core/src/binding.rs

use crate::config::ConfigDocument;
use crate::error::BridgeError;
use crate::reporting::ReportingSession;
use crate::types::{ComponentStore, FrameHandle};
use tracing::debug;

/// Picks the identifier a robot reports under: its declared name, or `default`
/// when it has none. A blank name counts as none.
pub fn resolve_identifier(name: Option<String>, default: &str) -> String {
    name.filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Prepares `session` for `entity`: resolves the identifier and hands over the
/// parsed configuration document. Fails without side effects on the store.
pub fn bind_session<S: ComponentStore + ?Sized>(
    entity: FrameHandle,
    document: Option<&str>,
    store: &S,
    session: &mut dyn ReportingSession,
) -> Result<String, BridgeError> {
    if !store.contains(entity) {
        return Err(BridgeError::UnknownEntity(entity));
    }

    let identifier = resolve_identifier(store.name(entity), session.identifier());
    session.set_identifier(&identifier);

    let document = ConfigDocument::parse(document)?;
    session.read_configuration(&document)?;

    debug!(
        entity = entity.0,
        identifier = %identifier,
        configured = !document.is_empty(),
        "bound read-only session"
    );
    Ok(identifier)
}
