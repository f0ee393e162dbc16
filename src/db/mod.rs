pub mod appointment;
pub mod chat;
pub mod finance;
pub mod salon_config;
