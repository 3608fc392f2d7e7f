use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset. Matches every `tamil_*` crate.
pub const DEFAULT_FILTER: &str = "tamil=info";

/// Install the global subscriber: human-readable lines on stderr, or JSON
/// lines in `<log_dir>/imetool-trace.jsonl` when a directory is given.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// whole run.
pub fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::never(dir, "imetool-trace.jsonl");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let _ = tracing_subscriber::fmt()
                .json()
                .with_writer(non_blocking)
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_env_filter(filter)
                .try_init();
            Some(guard)
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_env_filter(filter)
                .try_init();
            None
        }
    }
}
