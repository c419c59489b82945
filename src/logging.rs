// src/logging.rs
//
// Tracing setup for hosts embedding the checker.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::FormatTime;

/// Timer that writes nothing, for compact output
struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(
        &self,
        _w: &mut tracing_subscriber::fmt::format::Writer<'_>,
    ) -> std::fmt::Result {
        Ok(())
    }
}

/// Install a stderr subscriber if `TARN_LOG` is set (EnvFilter syntax).
///
/// `TARN_LOG_STYLE=full` adds timestamps; the default is compact. Returns
/// whether a subscriber was installed by this call.
pub fn init() -> bool {
    let Ok(filter) = EnvFilter::try_from_env("TARN_LOG") else {
        return false;
    };
    let style = std::env::var("TARN_LOG_STYLE").unwrap_or_default();
    let installed = if style == "full" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_timer(NoTimestamp)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
            .try_init()
    };
    // A host may already own the global subscriber.
    if installed.is_err() {
        return false;
    }
    tracing::debug!("tracing initialized");
    true
}
