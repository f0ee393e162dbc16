pub mod protocol;
#[cfg(test)]
mod protocol_tests;
pub mod rooms;
pub mod server;
pub mod websocket;

pub use rooms::{RoomKey, SessionId};
pub use server::ChatServer;
pub use websocket::chat_websocket;
