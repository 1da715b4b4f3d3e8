use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "load_routes");
/// // Or with additional fields:
/// trace_time!(start, "query", kind = "dist");
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Initialize structured logging on stderr.
///
/// `RUST_LOG` or `TRAINS_LOG` override the level chosen from the flags.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("TRAINS_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(directive_for(level_for(verbose, log_level))));

    let json = log_json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
    });
    let compact = (!log_json).then(|| {
        fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(compact)
        .try_init()?;
    Ok(())
}

/// An explicit level wins; `--verbose` means debug
fn level_for(verbose: bool, log_level: Option<&str>) -> &str {
    match log_level {
        Some(level) => level,
        None if verbose => "debug",
        None => "warn",
    }
}

/// Build the filter directive for a bare level or a full directive string
fn directive_for(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("trains={level},trains_core={level}")
    }
}
