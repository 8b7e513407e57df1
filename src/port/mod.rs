//! Ports: traits the core uses to reach the outside world.

pub mod source;

pub use source::DataSource;
