//! Stderr logging using env_logger
//!
//! Defaults to `warn`. `RUST_LOG` takes over when set, and each `-v` flag
//! raises the level explicitly (info, debug, trace).

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialize logging for the given `-v` count.
pub fn init(verbosity: u8) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_for(verbosity) {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(false).init();
}

fn level_for(verbosity: u8) -> Option<LevelFilter> {
    match verbosity {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}
