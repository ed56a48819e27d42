//! Tracing initialization
//!
//! Servers log through a registry with an `EnvFilter`; production switches the
//! formatter to JSON lines. Command-line tools use a plain `fmt` subscriber.

mod init_basic;

pub use init_basic::{init_cli_tracing, init_telemetry, shutdown_telemetry, TelemetryFormat};
