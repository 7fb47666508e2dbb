// src/server/state.rs

//! Application state for the signaling backend.
//!
//! Holds the address of the signaling server actor. Used to share state
//! between the HTTP/WebSocket handlers and the actor system.

use actix::Addr;

use crate::server::signaling::server::SignalingServer;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the signaling server actor (owns registry, waiting slot,
    /// and pair table).
    pub signaling_addr: Addr<SignalingServer>,
}

impl AppState {
    /// Create a new AppState with the given actor address.
    pub fn new(signaling_addr: Addr<SignalingServer>) -> Self {
        AppState { signaling_addr }
    }
}
