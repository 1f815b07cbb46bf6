/// Installs the global tracing subscriber.
///
/// `RUST_LOG` controls verbosity and defaults to `info`. Output is compact with
/// uptime timestamps. Calling it more than once is harmless.
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .try_init();
}
