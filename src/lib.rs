pub mod assemble;
pub mod cleanup;
pub mod convert;
pub mod cube;
pub mod discover;
pub mod projection;
pub mod sanitize;
pub mod site;
pub mod title;

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber from `RUST_LOG`, defaulting to warnings.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}
