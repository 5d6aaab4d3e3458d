use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// `AMORT_LOG` takes precedence; otherwise `--verbose` selects `debug`
/// and the default is `warn` so stdout stays clean for piping.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("AMORT_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
