use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Short human-readable lines on stdout.
    #[default]
    Compact,
    /// JSON lines on stderr, for when the host shell collects our logs.
    Json,
}

/// `RUST_LOG` wins; otherwise our own crate at info (debug with `verbose`).
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "nbf_import=debug,info"
    } else {
        "nbf_import=info"
    }
}

pub fn init_logger(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let base = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let layer = match format {
        LogFormat::Compact => base.compact().boxed(),
        LogFormat::Json => base.with_writer(std::io::stderr).json().boxed(),
    };

    // 重複初始化（例如測試中）時保留先前的 subscriber
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_follows_verbosity() {
        assert_eq!(default_directive(false), "nbf_import=info");
        assert!(default_directive(true).starts_with("nbf_import=debug"));
        assert_eq!(LogFormat::default(), LogFormat::Compact);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logger(false, LogFormat::Compact);
        init_logger(true, LogFormat::Json);
    }
}
