//! Application layer: configuration and the advisor service.

pub mod advisor;
pub mod config;

pub use advisor::{Advice, Advisor, TeamReport, TEAM_UNAVAILABLE};
pub use config::{Config, LoggingConfig};
