//! Tracing/logging setup shared by every process that hosts the store crates.

/// Initialize process-wide logging with the default (JSON) format.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    self::tracing::init_with(LogFormat::default());
}

/// Initialize process-wide logging with an explicit format.
pub fn init_with(format: LogFormat) {
    self::tracing::init_with(format);
}

/// Subscriber configuration (filters, formatting).
pub mod tracing;

pub use self::tracing::{LogFormat, UnknownLogFormat};
