//! Log setup. `RUST_LOG` wins over the configured level.
use tracing_subscriber::{EnvFilter, fmt};

pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Output goes to stdout, so logs stay on stderr.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
