use tracing_subscriber::{EnvFilter, fmt};

pub struct LoggerUtils {}

impl LoggerUtils {
    /// Installs the global subscriber. `RUST_LOG` wins over `verbose` when set.
    pub fn init(verbose: bool) {
        let default_level = if verbose { "info" } else { "warn" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr) // stdout carries the downloaded path
            .with_target(false)
            .with_level(true)
            .compact()
            .init();
    }
}
