//! HTTP and WebSocket routing configuration.
//!
//! Defines the signaling endpoint. The connection lifecycle and protocol
//! handling live in the session actor behind it.

use actix_web::web;

use crate::server::signaling::session::ws_signaling;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws").to(ws_signaling));
}
