//! Shared utilities for the franchise election core.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat, UnknownLogFormat};
pub use time::format_duration;
