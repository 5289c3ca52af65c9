// autolink/src/logger.rs
//! Logging setup for the autolink binary.
//!
//! Logs go to stderr so they never mix with linked output on stdout.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes `env_logger`, honoring `RUST_LOG` unless `level_override` is given.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None).try_init().ok();
}
