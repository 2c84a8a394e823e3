use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. Safe to call more than once; later
/// calls are no-ops so tests can initialize freely.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
