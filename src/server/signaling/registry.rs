use actix::Recipient;
use log::warn;
use std::collections::HashMap;
use uuid::Uuid;

use super::error::SignalError;
use super::messages::ServerWsMessage;

/// Connection registry: source of truth for which clients are live.
///
/// Maps each connected client id to the recipient end of its session
/// mailbox. Owned exclusively by the signaling server actor, so every
/// mutation is serialized with the matchmaking and relay logic and no frame
/// can be routed to a half-removed client.
pub struct ConnectionRegistry {
    connections: HashMap<Uuid, Recipient<ServerWsMessage>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
        }
    }

    /// Add a connection. Refuses ids that are already registered.
    pub fn register(
        &mut self,
        id: Uuid,
        addr: Recipient<ServerWsMessage>,
    ) -> Result<(), SignalError> {
        if self.connections.contains_key(&id) {
            return Err(SignalError::DuplicateId(id));
        }
        self.connections.insert(id, addr);
        Ok(())
    }

    /// Remove a connection. Returns whether it existed; calling twice is a
    /// no-op.
    pub fn unregister(&mut self, id: &Uuid) -> bool {
        self.connections.remove(id).is_some()
    }

    /// Whether the client is currently connected.
    pub fn contains(&self, id: &Uuid) -> bool {
        self.connections.contains_key(id)
    }

    /// Whether `addr` is the session currently registered for `id`.
    pub fn is_current(&self, id: &Uuid, addr: &Recipient<ServerWsMessage>) -> bool {
        self.connections.get(id).map_or(false, |a| a == addr)
    }

    /// Number of connected clients.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Enqueue a frame on the client's session mailbox.
    ///
    /// Delivery is best-effort: the enqueue is bounded and non-blocking, and
    /// a full or closed mailbox drops the frame with a warning instead of
    /// stalling the caller. Returns `UnknownClient` if the id is not
    /// registered.
    pub fn send(&self, id: &Uuid, msg: ServerWsMessage) -> Result<(), SignalError> {
        let addr = self
            .connections
            .get(id)
            .ok_or(SignalError::UnknownClient(*id))?;
        if let Err(e) = addr.try_send(msg) {
            warn!("[Registry] Dropped frame for client {}: {}", id, e);
        }
        Ok(())
    }
}
