pub mod appointment;
pub mod chat;
pub mod config;
pub mod finance;
mod health_check;

pub use health_check::*;
