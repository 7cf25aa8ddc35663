//! Structured logging with environment variable configuration.
//!
//! Logs are written to stderr so they never mix with the tables printed on
//! stdout. Records emitted through the `log` facade by the loader library
//! are forwarded to the same subscriber.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level`
/// 2. `RSTEST_BDD_DATA_LOG_LEVEL`
/// 3. Default configuration value
///
/// If a global subscriber is already set the call has no effect.
pub(crate) fn init_logging(config: &CliConfig) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .try_init();
    // The first subscriber wins; later initialisation attempts are ignored.
    drop(result);
}
