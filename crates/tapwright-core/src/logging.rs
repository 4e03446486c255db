//! Tracing subscriber setup for test runs.
//!
//! The helpers emit `tracing` spans and events but never install a
//! subscriber themselves. Test binaries call one of these once.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber on stderr.
///
/// `RUST_LOG` wins over `default_filter` when set. Returns `false` if a
/// global subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_test_writer()
        .try_init()
        .is_ok()
}

/// Installs a fmt subscriber appending to `dir/file_name`.
pub fn init_file_logging(dir: impl AsRef<Path>, file_name: &str, default_filter: &str) -> bool {
    let file_appender = tracing_appender::rolling::never(dir.as_ref(), file_name);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .is_ok()
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}
