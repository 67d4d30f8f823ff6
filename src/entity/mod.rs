pub mod alerts;
pub mod poles;
pub mod telemetry;
pub mod types;
