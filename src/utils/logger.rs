use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "handpick_intake";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line human output for local runs.
    Compact,
    /// One JSON object per event, for hosted log collectors.
    Json,
}

/// `RUST_LOG` wins when set; otherwise this crate logs at info (debug when
/// verbose) and dependencies at info.
fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(format!("{}=debug,info", CRATE_TARGET))
        } else {
            EnvFilter::new(format!("{}=info", CRATE_TARGET))
        }
    })
}

/// Installs the global subscriber. Fails if one is already installed, which
/// callers embedding the engine in a larger app may safely ignore.
pub fn init_with_format(format: LogFormat, verbose: bool) -> Result<(), TryInitError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(default_filter(verbose));
    match format {
        LogFormat::Compact => registry.with(fmt_layer.compact()).try_init(),
        LogFormat::Json => registry.with(fmt_layer.json()).try_init(),
    }
}

pub fn init_logger(verbose: bool) -> Result<(), TryInitError> {
    init_with_format(LogFormat::Compact, verbose)
}

pub fn init_json_logger() -> Result<(), TryInitError> {
    init_with_format(LogFormat::Json, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_error_instead_of_panicking() {
        let _ = init_logger(false);
        assert!(init_json_logger().is_err());
    }
}
