//! Test doubles shared by the signaling tests.

use actix::prelude::*;
use std::sync::{Arc, Mutex};

use super::messages::{ServerWsMessage, SessionKicked};

pub type Frames = Arc<Mutex<Vec<ServerWsMessage>>>;
pub type Kicks = Arc<Mutex<Vec<String>>>;

/// Stand-in for a client session: records every frame the server sends it.
pub struct Recorder {
    frames: Frames,
    kicks: Kicks,
}

/// No-op message used to drain a recorder's mailbox: once it is answered,
/// every frame enqueued before it has been recorded.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Barrier;

impl Actor for Recorder {
    type Context = Context<Self>;
}

impl Handler<ServerWsMessage> for Recorder {
    type Result = ();

    fn handle(&mut self, msg: ServerWsMessage, _ctx: &mut Self::Context) -> Self::Result {
        self.frames.lock().unwrap().push(msg);
    }
}

impl Handler<SessionKicked> for Recorder {
    type Result = ();

    fn handle(&mut self, msg: SessionKicked, _ctx: &mut Self::Context) -> Self::Result {
        self.kicks.lock().unwrap().push(msg.reason);
    }
}

impl Handler<Barrier> for Recorder {
    type Result = ();

    fn handle(&mut self, _msg: Barrier, _ctx: &mut Self::Context) -> Self::Result {}
}

/// Start a recorder and hand back its address plus the recorded frames and
/// kick reasons.
pub fn spawn_recorder() -> (Addr<Recorder>, Frames, Kicks) {
    let frames: Frames = Arc::new(Mutex::new(Vec::new()));
    let kicks: Kicks = Arc::new(Mutex::new(Vec::new()));
    let addr = Recorder {
        frames: frames.clone(),
        kicks: kicks.clone(),
    }
    .start();
    (addr, frames, kicks)
}

/// Wait until the recorder has processed everything sent to it so far.
pub async fn flush(addr: &Addr<Recorder>) {
    addr.send(Barrier).await.unwrap();
}
