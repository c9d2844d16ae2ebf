//! Subscriber setup shared by both binaries

use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_DIRECTIVES: &str = "info";

/// `RUST_LOG`-style directives as given, falling back to `info`
pub fn filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs the fmt subscriber filtered by `RUST_LOG`
pub fn init() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter(directives.as_deref()))
        .init();
}
