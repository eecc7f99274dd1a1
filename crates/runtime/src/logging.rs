//! Tracing subscriber setup for binaries and tests embedding the runtime.

/// Installs a `fmt` subscriber on stderr filtered by `RUST_LOG`, with `info`
/// as the baseline. Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("tracing initialized");
    }
}
