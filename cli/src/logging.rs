use std::path::Path;

use anyhow::Context;
use approvals_core::api::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber. Logs go to stderr so stdout carries only
/// the verdict. `RUST_LOG` takes precedence over the configured level.
///
/// The returned guard must be held until exit or buffered file output is lost.
pub fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(&cfg.level)
            .with_context(|| format!("invalid log level {:?}", cfg.level))?,
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cfg.ansi)
        .with_target(false);

    let Some(file) = &cfg.file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()
            .context("install subscriber")?;
        return Ok(None);
    };

    let path = Path::new(file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("log file has no file name: {file}"))?;
    std::fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    let file_layer = fmt::layer().with_writer(writer).with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("install subscriber")?;
    Ok(Some(guard))
}
