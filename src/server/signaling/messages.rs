use actix::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::error::SignalError;

// Message client -> serveur
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    FindPartner,
    Offer { target: Option<Uuid>, payload: Value },
    Answer { target: Option<Uuid>, payload: Value },
    Candidate { target: Option<Uuid>, payload: Value },
    Custom { target: Option<Uuid>, payload: Value },
    Chat { target: Option<Uuid>, text: String },
    Leave,
    Ping,
}

// Message serveur -> client
#[derive(Message, Serialize, Deserialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    Waiting,
    Matched { partner_id: Uuid },
    Offer { from: Uuid, payload: Value },
    Answer { from: Uuid, payload: Value },
    Candidate { from: Uuid, payload: Value },
    Custom { from: Uuid, payload: Value },
    Chat { from: Uuid, text: String },
    PartnerLeft,
    Error { code: String, message: String },
}

impl ServerWsMessage {
    pub fn matched(partner_id: Uuid) -> Self {
        Self::Matched { partner_id }
    }
    pub fn error(err: &SignalError) -> Self {
        Self::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Body of a relayed message, parsed from the client frame.
///
/// The payload is opaque: the server forwards it without inspecting its
/// contents.
#[derive(Clone, Debug)]
pub enum SignalBody {
    Offer(Value),
    Answer(Value),
    Candidate(Value),
    Custom(Value),
    Chat(String),
}

impl SignalBody {
    /// Wire name of the message kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SignalBody::Offer(_) => "offer",
            SignalBody::Answer(_) => "answer",
            SignalBody::Candidate(_) => "candidate",
            SignalBody::Custom(_) => "custom",
            SignalBody::Chat(_) => "chat",
        }
    }

    /// Build the server -> client frame delivered to the destination.
    pub fn into_server_msg(self, from: Uuid) -> ServerWsMessage {
        match self {
            SignalBody::Offer(payload) => ServerWsMessage::Offer { from, payload },
            SignalBody::Answer(payload) => ServerWsMessage::Answer { from, payload },
            SignalBody::Candidate(payload) => ServerWsMessage::Candidate { from, payload },
            SignalBody::Custom(payload) => ServerWsMessage::Custom { from, payload },
            SignalBody::Chat(text) => ServerWsMessage::Chat { from, text },
        }
    }
}

/// Message: a client connected and its session is ready to receive frames.
///
/// `kick` is only used when the registration is refused (duplicate id), to
/// close the offending session.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub id: Uuid,
    pub addr: Recipient<ServerWsMessage>,
    pub kick: Recipient<SessionKicked>,
}

/// Message: a client's transport went away, or it sent an explicit leave.
/// Both converge on the same cleanup.
///
/// `addr` identifies the departing session: a kicked duplicate session
/// reports the same id as the established one, and must not tear down the
/// established session's state.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: Uuid,
    pub addr: Recipient<ServerWsMessage>,
}

/// Message: client requests to be matched with a partner.
#[derive(Message)]
#[rtype(result = "()")]
pub struct FindPartner {
    pub id: Uuid,
}

/// Message: client asks the relay to forward a signaling payload.
///
/// `target` carries the explicit destination if the client named one; the
/// relay validates it against the pair table either way.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Relay {
    pub from: Uuid,
    pub target: Option<Uuid>,
    pub body: SignalBody,
}

/// Message: instructs a session actor to close its connection.
#[derive(Message)]
#[rtype(result = "()")]
pub struct SessionKicked {
    pub reason: String,
}
