mod appointment;
mod chat;
mod message;
mod salon_config;

pub use appointment::*;
pub use chat::*;
pub use message::*;
pub use salon_config::*;
