use super::protocol::{ClientEvent, NewMessagePayload, SendMessagePayload, ServerEvent};
use super::rooms::{RoomKey, SessionId};
use super::server::{self, ChatServer};
use crate::db;
use crate::models::SenderRole;
use actix::fut::wrap_future;
use actix::{Actor, ActorContext, ActorFutureExt, Addr, AsyncContext, Handler, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use sqlx::PgPool;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// WebSocket heartbeat interval
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
/// Client timeout - close connection if no heartbeat received
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// One actor per live chat connection. Room membership lives in the
/// shared `ChatServer`; this actor parses frames and runs the database
/// work. DB futures run through `ctx.wait`, which suspends the session
/// until they resolve, so one connection's events persist and broadcast
/// in arrival order.
pub struct ChatSession {
    id: SessionId,
    server: Addr<ChatServer>,
    pg_pool: PgPool,
    hb: Instant,
}

impl ChatSession {
    pub fn new(server: Addr<ChatServer>, pg_pool: PgPool) -> Self {
        Self {
            id: Uuid::new_v4(),
            server,
            pg_pool,
            hb: Instant::now(),
        }
    }

    fn hb(&self, ctx: &mut <Self as Actor>::Context) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                tracing::warn!("Chat client heartbeat failed, disconnecting");
                ctx.stop();
                return;
            }

            ctx.ping(b"");
        });
    }

    fn handle_join(&self, raw: &str, ctx: &mut <Self as Actor>::Context) {
        match RoomKey::parse(raw) {
            Some(room) => self.server.do_send(server::Join { id: self.id, room }),
            None => ctx.text(
                ServerEvent::error("Failed to join room", "empty room key").to_frame(),
            ),
        }
    }

    /// Persist first; the broadcast only ever happens from the success
    /// arm. On failure the sender alone is notified and nothing is
    /// broadcast.
    fn handle_send(&self, payload: SendMessagePayload, ctx: &mut <Self as Actor>::Context) {
        if payload.content.trim().is_empty() {
            ctx.text(
                ServerEvent::error("Failed to store message", "content must not be empty")
                    .to_frame(),
            );
            return;
        }

        let sender = payload.sender.unwrap_or(SenderRole::User);
        let pg_pool = self.pg_pool.clone();
        let fut = wrap_future::<_, Self>(async move {
            db::chat::insert_message(&pg_pool, &payload.email, sender, &payload.content).await
        })
        .map(|result, act, ctx| match result {
            Ok(message) => {
                let frame = ServerEvent::NewMessage(NewMessagePayload::from(&message)).to_frame();
                act.server.do_send(server::Emit {
                    room: RoomKey::user(&message.user_email),
                    payload: frame,
                });
            }
            Err(err) => {
                ctx.text(ServerEvent::error("Failed to store message", err).to_frame());
            }
        });

        ctx.wait(fut);
    }

    fn handle_mark_read(
        &self,
        user_email: String,
        actor: SenderRole,
        ctx: &mut <Self as Actor>::Context,
    ) {
        let pg_pool = self.pg_pool.clone();
        let fut = wrap_future::<_, Self>(async move {
            let result = db::chat::mark_read(&pg_pool, &user_email, actor).await;
            (user_email, result)
        })
        .map(move |(user_email, result), act, ctx| match result {
            Ok(affected) => {
                let (room, receipt) = super::protocol::read_receipt(&user_email, actor, affected);
                act.server.do_send(server::Emit {
                    room,
                    payload: ServerEvent::MessageReadReceipt(receipt).to_frame(),
                });
            }
            Err(err) => {
                ctx.text(ServerEvent::error("Failed to mark messages as read", err).to_frame());
            }
        });

        ctx.wait(fut);
    }
}

impl Actor for ChatSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::info!("Chat WebSocket connection started: session_id={}", self.id);
        self.hb(ctx);
        self.server.do_send(server::Connect {
            id: self.id,
            addr: ctx.address().recipient(),
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("Chat WebSocket connection closed: session_id={}", self.id);
        self.server.do_send(server::Disconnect { id: self.id });
    }
}

impl Handler<server::Outbound> for ChatSession {
    type Result = ();

    fn handle(&mut self, msg: server::Outbound, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ChatSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                let event: ClientEvent = match serde_json::from_str(&text) {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::warn!("Failed to parse chat frame: {:?}", err);
                        ctx.text(
                            ServerEvent::error("Malformed frame", err.to_string()).to_frame(),
                        );
                        return;
                    }
                };

                match event {
                    ClientEvent::JoinRoom(raw) => self.handle_join(&raw, ctx),
                    ClientEvent::SendMessage(payload) => self.handle_send(payload, ctx),
                    ClientEvent::MarkRead(payload) => {
                        self.handle_mark_read(payload.user_email, payload.actor, ctx)
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                tracing::warn!("Binary frames are not part of the chat protocol");
            }
            Ok(ws::Message::Close(reason)) => {
                tracing::info!("Chat WebSocket close received: {:?}", reason);
                ctx.close(reason);
                ctx.stop();
            }
            _ => {}
        }
    }
}

/// WebSocket route handler - entry point for chat connections
#[tracing::instrument(name = "Chat WebSocket connection", skip(req, stream, server, pg_pool))]
pub async fn chat_websocket(
    req: HttpRequest,
    stream: web::Payload,
    server: web::Data<Addr<ChatServer>>,
    pg_pool: web::Data<PgPool>,
) -> Result<HttpResponse, Error> {
    let session = ChatSession::new(server.get_ref().clone(), pg_pool.get_ref().clone());
    ws::start(session, &req, stream)
}
