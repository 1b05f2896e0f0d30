//! Logging setup.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Setup logging with the given level.
///
/// When `log_dir` is set, a daily-rolled file layer runs next to the
/// console layer. The returned guard must stay alive until process exit
/// or buffered file writes are lost.
pub fn setup_logging(level: &str, json: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "momo-trader.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stack = tracing_subscriber::registry().with(filter).with(file_layer);

    if json {
        stack.with(fmt::layer().json()).init();
    } else {
        stack.with(fmt::layer().pretty()).init();
    }

    guard
}
