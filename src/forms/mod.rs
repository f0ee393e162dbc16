mod appointment;
mod message;
mod salon_config;

pub use appointment::*;
pub use message::*;
pub use salon_config::*;
