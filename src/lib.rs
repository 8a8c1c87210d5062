pub mod calendar;
pub mod config;
pub mod error;
pub mod programs;
pub mod shell;
pub mod telemetry;
pub mod validation;

pub use validation::ValidationError;
