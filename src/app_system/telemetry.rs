/// Configures the global tracing subscriber once for the whole process.
///
/// Verbosity comes from `RUST_LOG` and defaults to `info`:
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=cart_store::cart_actor=debug,info cargo run
/// ```
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // try_init: a second call (tests, embedding apps) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .try_init();
}
