/// Signaling server actor.
///
/// Owns all shared matchmaking state: the connection registry, the single
/// waiting slot, and the pair table. Every handler runs on the actor's
/// mailbox, which serializes the read-modify-write sequences the pairing
/// algorithm depends on: two concurrent match requests can never both
/// observe an empty slot, and no frame is routed to a half-removed client.
use actix::prelude::*;
use log::{debug, error, info, warn};
use uuid::Uuid;

use super::error::SignalError;
use super::messages::{Connect, Disconnect, FindPartner, Relay, ServerWsMessage, SessionKicked};
use super::pairs::PairTable;
use super::registry::ConnectionRegistry;

/// Main signaling server actor.
pub struct SignalingServer {
    /// Live connections, keyed by client id.
    registry: ConnectionRegistry,
    /// The one client currently waiting for a partner, if any.
    waiting: Option<Uuid>,
    /// Active pairings.
    pairs: PairTable,
}

impl SignalingServer {
    /// Create a new signaling server with no connected clients.
    pub fn new() -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            waiting: None,
            pairs: PairTable::new(),
        }
    }

    /// Send a frame to a client, logging if it cannot be enqueued.
    fn notify(&self, id: &Uuid, msg: ServerWsMessage) {
        if let Err(e) = self.registry.send(id, msg) {
            warn!("[Signaling] Notification to {} failed: {}", id, e);
        }
    }

    /// Send an error frame for a rejected operation. Falls back to a log
    /// entry if the client is already gone, so no rejection goes unreported.
    fn report(&self, id: &Uuid, err: &SignalError) {
        if self.registry.send(id, ServerWsMessage::error(err)).is_err() {
            debug!(
                "[Signaling] Could not report {} to departed client {}",
                err.code(),
                id
            );
        }
    }

    /// Disconnect cleanup, shared by explicit leave and transport loss.
    /// Safe to run more than once for the same client.
    fn on_disconnect(&mut self, id: &Uuid) {
        if self.waiting == Some(*id) {
            self.waiting = None;
            debug!("[Signaling] Cleared waiting slot for {}", id);
        }
        if let Some(partner) = self.pairs.partner_of(id) {
            // Notify before unpairing so the partner lookup stays valid; the
            // send may fail if the partner is already gone.
            if let Err(e) = self.registry.send(&partner, ServerWsMessage::PartnerLeft) {
                debug!(
                    "[Signaling] PartnerLeft for {} undeliverable: {}",
                    partner, e
                );
            }
            self.pairs.unpair(id);
            info!("[Signaling] Session dissolved: {} left {}", id, partner);
        }
        if self.registry.unregister(id) {
            info!(
                "[Signaling] Client {} disconnected ({} online)",
                id,
                self.registry.len()
            );
        }
    }
}

impl Actor for SignalingServer {
    type Context = Context<Self>;
}

impl Handler<Connect> for SignalingServer {
    type Result = ();

    /// Handles a new client connection.
    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        match self.registry.register(msg.id, msg.addr) {
            Ok(()) => info!(
                "[Signaling] Client {} connected ({} online)",
                msg.id,
                self.registry.len()
            ),
            Err(err) => {
                // Ids are minted per connection, so a collision means a bug
                // in the transport layer. Refuse the registration and close
                // the new session; the established one keeps its state.
                error!("[Signaling] {}", err);
                let _ = msg.kick.try_send(SessionKicked {
                    reason: "A session with this id is already connected.".to_string(),
                });
            }
        }
    }
}

impl Handler<Disconnect> for SignalingServer {
    type Result = ();

    /// Handles a client going away, for any reason.
    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        // Only the session actually registered for this id may tear it
        // down; the stop callback of a kicked duplicate session must not
        // dissolve the established client's state.
        if self.registry.contains(&msg.id) && !self.registry.is_current(&msg.id, &msg.addr) {
            debug!(
                "[Signaling] Ignored disconnect from stale session of {}",
                msg.id
            );
            return;
        }
        self.on_disconnect(&msg.id);
    }
}

impl Handler<FindPartner> for SignalingServer {
    type Result = ();

    /// Handles a match request: pair with the waiting client if there is
    /// one, otherwise take the waiting slot.
    fn handle(&mut self, msg: FindPartner, _ctx: &mut Self::Context) -> Self::Result {
        let id = msg.id;
        if !self.registry.contains(&id) {
            // Raced with its own disconnect; nothing to do.
            debug!("[Signaling] FindPartner from unregistered client {}", id);
            return;
        }
        if self.pairs.is_paired(&id) {
            self.report(&id, &SignalError::AlreadyPaired(id));
            return;
        }
        if self.waiting == Some(id) {
            // Duplicate request; the client is already the sole occupant.
            debug!("[Signaling] {} repeated FindPartner while waiting", id);
            return;
        }
        match self.waiting.take() {
            Some(other) if self.registry.contains(&other) => match self.pairs.pair(id, other) {
                Ok(()) => {
                    self.notify(&id, ServerWsMessage::matched(other));
                    self.notify(&other, ServerWsMessage::matched(id));
                    info!(
                        "[Signaling] Matched {} with {} ({} active sessions)",
                        id,
                        other,
                        self.pairs.len()
                    );
                }
                Err(err) => {
                    // Both sides were checked unpaired above, so this is a
                    // logic bug; keep the occupant and reject the requester.
                    error!("[Signaling] Pairing {} with {} failed: {}", id, other, err);
                    self.waiting = Some(other);
                    self.report(&id, &err);
                }
            },
            stale => {
                // Slot empty, or its occupant disconnected before a partner
                // arrived.
                if let Some(ghost) = stale {
                    debug!("[Signaling] Dropped ghost {} from waiting slot", ghost);
                }
                self.waiting = Some(id);
                self.notify(&id, ServerWsMessage::Waiting);
                debug!("[Signaling] Client {} is waiting for a partner", id);
            }
        }
    }
}

impl Handler<Relay> for SignalingServer {
    type Result = ();

    /// Handles a relay request: resolve and authorize the destination, then
    /// forward the payload verbatim.
    fn handle(&mut self, msg: Relay, _ctx: &mut Self::Context) -> Self::Result {
        let partner = self.pairs.partner_of(&msg.from);
        let dest = match (msg.target, partner) {
            (Some(target), Some(partner)) if target == partner => target,
            (Some(target), _) => {
                // Explicit targets are never trusted: a client may only
                // address its actual partner.
                warn!(
                    "[Signaling] {} tried to relay {} to {} (not its partner)",
                    msg.from,
                    msg.body.kind(),
                    target
                );
                self.report(&msg.from, &SignalError::Unauthorized { claimed: target });
                return;
            }
            (None, Some(partner)) => partner,
            (None, None) => {
                self.report(&msg.from, &SignalError::NotPaired);
                return;
            }
        };
        let kind = msg.body.kind();
        match self.registry.send(&dest, msg.body.into_server_msg(msg.from)) {
            Ok(()) => debug!("[Signaling] Relayed {} from {} to {}", kind, msg.from, dest),
            Err(err) => {
                // Destination vanished mid-flight; the disconnect path owns
                // the PartnerLeft notification.
                debug!("[Signaling] {} relay from {} dropped: {}", kind, msg.from, err)
            }
        }
    }
}
