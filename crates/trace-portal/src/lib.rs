pub mod config;
pub mod error;
pub mod portal;
pub mod telemetry;
pub mod traces;
