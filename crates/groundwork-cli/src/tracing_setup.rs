//! Subscriber setup. Logs go to stderr so stdout carries only responses.

use groundwork_core::config::{env, ObservabilityConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `GROUNDWORK_LOG` wins; otherwise verbosity flags, then the configured level.
pub fn init_tracing(config: &ObservabilityConfig, verbose: u8, json_flag: bool) {
    let fallback = match verbose {
        0 => config.log_level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let filter = EnvFilter::try_from_env(env::LOG).unwrap_or_else(|_| EnvFilter::new(fallback));

    if json_flag || config.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
