//! Shared utilities for the Cardio Risk binaries.

pub mod logging;

pub use logging::{LogConfig, LogFormat, init_logging, redact_value};
