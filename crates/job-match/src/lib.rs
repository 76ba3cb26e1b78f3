pub mod catalog;
pub mod compatibility;
pub mod config;
pub mod error;
pub mod telemetry;
