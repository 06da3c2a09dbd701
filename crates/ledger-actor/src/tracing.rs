/// Initializes structured logging for the whole process.
///
/// Log verbosity is controlled through the `RUST_LOG` environment
/// variable, for example:
///
/// - `RUST_LOG=info` - lifecycle events and mutations
/// - `RUST_LOG=debug` - every command with its payload
/// - `RUST_LOG=campus_one=debug` - debug for a single crate
///
/// Call once at startup, before any actor is spawned.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
