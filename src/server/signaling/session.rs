/// WebSocket session actor for the signaling endpoint.
///
/// This actor manages a single client's connection: it registers the client
/// with the signaling server, enforces liveness with heartbeats, parses
/// client frames into signaling intents, and serializes server frames back
/// onto the socket.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::warn;
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::messages::{
    ClientWsMessage, Connect, Disconnect, FindPartner, Relay, ServerWsMessage, SessionKicked,
    SignalBody,
};
use super::server::SignalingServer;
use crate::config::signaling::{CLIENT_TIMEOUT_SECS, HEARTBEAT_INTERVAL_SECS};
use crate::server::flood::FloodGuard;
use crate::server::ws_error::ws_error_message;

/// Represents one client's WebSocket session.
pub struct WsSession {
    pub id: Uuid,
    pub signaling_addr: Addr<SignalingServer>,
    last_frame: Instant,
    flood: FloodGuard,
}

impl WsSession {
    pub fn new(id: Uuid, signaling_addr: Addr<SignalingServer>) -> Self {
        Self {
            id,
            signaling_addr,
            last_frame: Instant::now(),
            flood: FloodGuard::new(),
        }
    }

    /// Ping the client on an interval and drop the connection once it has
    /// been silent longer than the timeout, so a crashed client cannot
    /// occupy the waiting slot or a pairing forever.
    fn heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS), |act, ctx| {
            if act.last_frame.elapsed() > Duration::from_secs(CLIENT_TIMEOUT_SECS) {
                warn!("[Session] Client {} timed out, dropping connection", act.id);
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    fn forward(&self, target: Option<Uuid>, body: SignalBody) {
        self.signaling_addr.do_send(Relay {
            from: self.id,
            target,
            body,
        });
    }

    fn handle_client_message(
        &mut self,
        msg: ClientWsMessage,
        ctx: &mut ws::WebsocketContext<Self>,
    ) {
        match msg {
            ClientWsMessage::FindPartner => {
                self.signaling_addr.do_send(FindPartner { id: self.id });
            }
            ClientWsMessage::Offer { target, payload } => {
                self.forward(target, SignalBody::Offer(payload));
            }
            ClientWsMessage::Answer { target, payload } => {
                self.forward(target, SignalBody::Answer(payload));
            }
            ClientWsMessage::Candidate { target, payload } => {
                self.forward(target, SignalBody::Candidate(payload));
            }
            ClientWsMessage::Custom { target, payload } => {
                self.forward(target, SignalBody::Custom(payload));
            }
            ClientWsMessage::Chat { target, text } => {
                self.forward(target, SignalBody::Chat(text));
            }
            ClientWsMessage::Leave => {
                // Voluntary leave: same cleanup as a transport disconnect,
                // applied immediately, then close this side too.
                self.signaling_addr.do_send(Disconnect {
                    id: self.id,
                    addr: ctx.address().recipient(),
                });
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Normal,
                    description: None,
                }));
                ctx.stop();
            }
            ClientWsMessage::Ping => {
                // Application-level keepalive; receiving it already refreshed
                // the liveness timestamp.
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Registers the client with the
    /// signaling server and begins the heartbeat.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.heartbeat(ctx);
        self.signaling_addr.do_send(Connect {
            id: self.id,
            addr: ctx.address().recipient(),
            kick: ctx.address().recipient(),
        });
    }

    /// Called when the session stops, for any reason. The cleanup is
    /// idempotent, so a stop after an explicit leave is harmless.
    fn stopped(&mut self, ctx: &mut Self::Context) {
        self.signaling_addr.do_send(Disconnect {
            id: self.id,
            addr: ctx.address().recipient(),
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    /// Handles incoming WebSocket frames from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        self.last_frame = Instant::now();
        match msg {
            Ok(ws::Message::Text(text)) => {
                if self.flood.record_message() {
                    warn!(
                        "[Session] Client {} exceeded the message rate, closing",
                        self.id
                    );
                    ctx.text(ws_error_message(
                        "FLOODED",
                        "Too many messages, slow down.",
                        None,
                    ));
                    ctx.close(Some(ws::CloseReason {
                        code: ws::CloseCode::Policy,
                        description: Some("Message flood".into()),
                    }));
                    ctx.stop();
                    return;
                }
                match serde_json::from_str::<ClientWsMessage>(&text) {
                    Ok(msg) => {
                        self.flood.reset_error_suppression();
                        self.handle_client_message(msg, ctx);
                    }
                    Err(_e) => {
                        // Invalid client message format.
                        if self.flood.should_send_error("INVALID_MESSAGE") {
                            ctx.text(ws_error_message(
                                "INVALID_MESSAGE",
                                "Invalid client message",
                                None,
                            ));
                        }
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Close(_)) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for WsSession {
    type Result = ();

    /// Handles frames sent by the signaling server to this client.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: notify client and close connection.
                warn!("[Session] Failed to serialize server frame: {}", e);
                ctx.text(ws_error_message(
                    "INTERNAL",
                    "Internal server error",
                    None,
                ));
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

impl Handler<SessionKicked> for WsSession {
    type Result = ();

    /// Handles being kicked by the signaling server (duplicate id).
    fn handle(&mut self, msg: SessionKicked, ctx: &mut Self::Context) {
        ctx.text(ws_error_message("SESSION_KICKED", &msg.reason, None));
        ctx.close(Some(ws::CloseReason {
            code: ws::CloseCode::Policy,
            description: Some(msg.reason),
        }));
        ctx.stop();
    }
}

/// WebSocket endpoint for the signaling service.
///
/// Clients are anonymous: each accepted connection is assigned a fresh id,
/// valid for the lifetime of that connection only.
pub async fn ws_signaling(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let id = Uuid::new_v4();
    ws::start(
        WsSession::new(id, data.signaling_addr.clone()),
        &req,
        stream,
    )
}
