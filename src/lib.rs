pub mod collector_client;
pub mod configuration;
pub mod domain;
mod error;
pub mod routes;
pub mod startup;
pub mod telemetry;
