pub mod chat;
pub mod configuration;
pub mod db;
pub mod forms;
pub(crate) mod helpers;
pub mod models;
pub mod routes;
pub mod startup;
pub mod telemetry;
