use super::rooms::{RoomKey, Rooms, SessionId};
use actix::prelude::*;
use std::collections::HashMap;

/// A serialized server event frame pushed to one session's socket.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub String);

#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub id: SessionId,
    pub addr: Recipient<Outbound>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: SessionId,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Join {
    pub id: SessionId,
    pub room: RoomKey,
}

/// Best-effort fan-out of a frame to every session currently in a room.
/// Disconnected clients simply miss the event and reconcile through a
/// full-history fetch on reconnect.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Emit {
    pub room: RoomKey,
    pub payload: String,
}

/// Central router: owns room membership and the live session addresses.
/// One instance per process, started during startup and shared through
/// app data.
pub struct ChatServer {
    sessions: HashMap<SessionId, Recipient<Outbound>>,
    rooms: Rooms,
}

impl ChatServer {
    pub fn new() -> Self {
        ChatServer {
            sessions: HashMap::new(),
            rooms: Rooms::new(),
        }
    }
}

impl Default for ChatServer {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for ChatServer {
    type Context = Context<Self>;
}

impl Handler<Connect> for ChatServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) {
        tracing::info!("Chat session connected: {}", msg.id);
        self.sessions.insert(msg.id, msg.addr);
    }
}

impl Handler<Disconnect> for ChatServer {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) {
        tracing::info!("Chat session disconnected: {}", msg.id);
        self.sessions.remove(&msg.id);
        self.rooms.leave_all(msg.id);
    }
}

impl Handler<Join> for ChatServer {
    type Result = ();

    fn handle(&mut self, msg: Join, _ctx: &mut Self::Context) {
        tracing::debug!("Session {} joined room {}", msg.id, msg.room);
        self.rooms.join(msg.id, msg.room);
    }
}

impl Handler<Emit> for ChatServer {
    type Result = ();

    fn handle(&mut self, msg: Emit, _ctx: &mut Self::Context) {
        let frame = Outbound(msg.payload);
        for session in self.rooms.members(&msg.room) {
            if let Some(addr) = self.sessions.get(session) {
                addr.do_send(frame.clone());
            }
        }
    }
}
