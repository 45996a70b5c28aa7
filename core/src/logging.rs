//! Tracing setup for the cycle runtime. Every run gets a fresh run id and a
//! JSON log stream under `logging.dir`; cycle events carry their tick and
//! chain id as fields, so one run's file replays as a sequence of cycles.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use anyhow::{Context, Result, anyhow};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{self, RollingFileAppender},
};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};
use uuid::Uuid;

use crate::config::{LoggingConfig, LoggingRotation};

const LOG_FILE_PREFIX: &str = "noema.log";

/// Keeps the non-blocking writer alive for the life of the process. Dropping
/// it flushes whatever the worker still buffers.
pub struct LoggingGuard {
    _worker_guard: WorkerGuard,
    run_id: Uuid,
}

impl LoggingGuard {
    pub fn run_id(&self) -> String {
        self.run_id.to_string()
    }
}

/// What one retention pass did to the log directory.
struct RetentionSweep {
    removed: usize,
    warnings: Vec<String>,
}

pub fn init_tracing(config: &LoggingConfig) -> Result<LoggingGuard> {
    check_config(config)?;

    let log_dir = resolve_log_dir(&config.dir)?;
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let sweep = sweep_expired_logs(&log_dir, config.retention_days, SystemTime::now());
    let appender = build_appender(&log_dir, &config.rotation);
    let (writer, worker_guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_current_span(true)
        .with_span_list(true)
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(build_env_filter(&config.filter)?);

    let stderr_layer = config.stderr_warn_enabled.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(LevelFilter::WARN)
    });

    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    let run_id = Uuid::now_v7();
    tracing::info!(
        target: "logging",
        run_id = %run_id,
        dir = %log_dir.display(),
        filter = %config.filter,
        rotation = ?config.rotation,
        retention_days = config.retention_days,
        expired_logs_removed = sweep.removed,
        "tracing online"
    );
    for warning in sweep.warnings {
        tracing::warn!(target: "logging", warning = %warning, "retention sweep warning");
    }

    Ok(LoggingGuard {
        _worker_guard: worker_guard,
        run_id,
    })
}

fn check_config(config: &LoggingConfig) -> Result<()> {
    if config.filter.trim().is_empty() {
        return Err(anyhow!("logging.filter cannot be empty"));
    }
    if config.dir.as_os_str().is_empty() {
        return Err(anyhow!("logging.dir cannot be empty"));
    }
    Ok(())
}

fn build_env_filter(filter: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(filter)
        .with_context(|| format!("failed to parse logging.filter '{filter}'"))
}

fn build_appender(log_dir: &Path, rotation: &LoggingRotation) -> RollingFileAppender {
    match rotation {
        LoggingRotation::Daily => rolling::daily(log_dir, LOG_FILE_PREFIX),
        LoggingRotation::Hourly => rolling::hourly(log_dir, LOG_FILE_PREFIX),
        LoggingRotation::Never => rolling::never(log_dir, LOG_FILE_PREFIX),
    }
}

fn resolve_log_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }

    Ok(std::env::current_dir()
        .context("failed to resolve logging.dir against the working directory")?
        .join(dir))
}

/// Removes run logs whose mtime predates the retention window. Only files
/// with the run-log prefix are touched; anything else in the directory stays.
fn sweep_expired_logs(log_dir: &Path, retention_days: usize, now: SystemTime) -> RetentionSweep {
    let retention = Duration::from_secs(retention_days.saturating_mul(24 * 60 * 60) as u64);
    let cutoff = now.checked_sub(retention).unwrap_or(SystemTime::UNIX_EPOCH);
    let mut sweep = RetentionSweep {
        removed: 0,
        warnings: Vec::new(),
    };

    let entries = match fs::read_dir(log_dir) {
        Ok(entries) => entries,
        Err(err) => {
            sweep
                .warnings
                .push(format!("cannot scan log directory {}: {err}", log_dir.display()));
            return sweep;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                sweep
                    .warnings
                    .push(format!("cannot read log directory entry: {err}"));
                continue;
            }
        };
        if !entry.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX) {
            continue;
        }

        let expired = match entry.metadata() {
            Ok(metadata) if metadata.is_file() => match metadata.modified() {
                Ok(modified) => modified <= cutoff,
                Err(err) => {
                    sweep
                        .warnings
                        .push(format!("cannot read mtime of {}: {err}", entry.path().display()));
                    continue;
                }
            },
            Ok(_) => continue,
            Err(err) => {
                sweep
                    .warnings
                    .push(format!("cannot stat {}: {err}", entry.path().display()));
                continue;
            }
        };

        if expired {
            match fs::remove_file(entry.path()) {
                Ok(()) => sweep.removed += 1,
                Err(err) => sweep.warnings.push(format!(
                    "cannot remove expired log {}: {err}",
                    entry.path().display()
                )),
            }
        }
    }

    sweep
}
