//! Base entity trait and re-render requests

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::trace;

/// An entity as seen by the host
///
/// Everything here is read on demand; an entity keeps no rendered state of
/// its own. When something changes it asks its platform to re-render it
/// through an [`UpdateRequester`].
pub trait Entity: Send + Sync {
    /// Entity domain, e.g. "binary_sensor"
    fn domain(&self) -> &'static str;

    /// Stable identifier used to recognise the entity across restarts
    fn unique_id(&self) -> String;

    /// Display name
    fn name(&self) -> String;

    /// Current state value; `None` renders as "unknown"
    fn state(&self) -> Option<String>;

    /// Domain specific state attributes
    fn attributes(&self) -> HashMap<String, Value> {
        HashMap::new()
    }
}

/// Handle an entity uses to ask its platform for an immediate re-render
///
/// Requests are keyed by unique id and processed by the platform in order.
#[derive(Debug, Clone)]
pub struct UpdateRequester {
    tx: mpsc::UnboundedSender<String>,
}

impl UpdateRequester {
    /// Create a requester and the receiving end a platform drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Schedule a state write for the entity with `unique_id`
    pub fn schedule_update(&self, unique_id: &str) {
        if self.tx.send(unique_id.to_string()).is_err() {
            // Platform already unloaded
            trace!(unique_id, "Dropping update request");
        }
    }
}
