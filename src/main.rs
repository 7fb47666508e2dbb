//! Main entry point for the signaling server.
//!
//! Initializes the actor system, configures application state, and launches
//! the HTTP server with the WebSocket signaling endpoint.

use actix::Actor;
use actix_web::{web, App, HttpServer};

use server::signaling::server::SignalingServer;

pub mod config;
mod server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::init();

    // Start the SignalingServer actor (owns registry, waiting slot, pairs).
    let signaling_addr = SignalingServer::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(signaling_addr));

    // Start the HTTP server with the WebSocket endpoint.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*")),
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((config::server::BIND_ADDR, config::server::BIND_PORT))?
    .run()
    .await
}
