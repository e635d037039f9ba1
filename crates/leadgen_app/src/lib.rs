//! Headless host for the lead dashboard: configuration, logging and the sync controller.
pub mod platform;

pub use platform::config::{AppConfig, ConfigError};
pub use platform::controller::SyncController;
pub use platform::logging::LogDestination;
