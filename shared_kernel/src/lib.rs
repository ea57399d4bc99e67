pub mod configuration;
pub mod ids;
pub mod non_empty_string;
pub mod telemetry;
