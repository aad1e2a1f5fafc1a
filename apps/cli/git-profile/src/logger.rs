//! Logging for the git-profile binary.
//!
//! Console lines go to stderr so rendered output on stdout stays clean; the
//! same lines, uncolored, go to `git-profile.log` in the log directory.

use crate::error::GitProfileError;

use std::io::stderr;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

static INIT_LOGGER_ONCE: Once = Once::new();

static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "git-profile.log";

#[cfg(debug_assertions)]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// HTTP internals are noise at debug level
const NOISY_DEPENDENCIES: [&str; 4] = ["reqwest", "hyper", "hyper_util", "rustls"];

/// Pick the level: `--verbose` forces Debug, otherwise the build default.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        DEFAULT_LOG_LEVEL
    }
}

/// Initialize the logger with dual output (stderr + file).
///
/// Safe to call more than once: later calls log a warning and return Ok.
///
/// # Errors
///
/// Returns [`GitProfileError::Logger`] if the log file cannot be created or a
/// global logger is already installed by someone else.
pub fn initialize(log_dir: &Path, level: LevelFilter) -> Result<(), GitProfileError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("Logger already initialized");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(log_dir, level);
        if result.is_ok() {
            info!("Logger initialized with level: {level:?}");
        }
    });

    result
}

#[track_caller]
fn initialize_internal(log_dir: &Path, level: LevelFilter) -> Result<(), GitProfileError> {
    let log_file_path = log_dir.join(LOG_FILE_NAME);

    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let mut base_dispatch = Dispatch::new().level(level);
    for dependency in NOISY_DEPENDENCIES {
        base_dispatch = base_dispatch.level_for(dependency, LevelFilter::Warn);
    }

    let console_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message}",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
            ))
        })
        .chain(stderr());

    let file_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{target}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                target = record.target(),
            ))
        })
        .chain(
            fern::log_file(&log_file_path).map_err(|e| {
                GitProfileError::logger(format!(
                    "Failed to create log file {}: {e}",
                    log_file_path.display()
                ))
            })?,
        );

    base_dispatch
        .chain(console_dispatch)
        .chain(file_dispatch)
        .apply()
        .map_err(|e| GitProfileError::logger(format!("Failed to initialize logger: {e}")))?;

    Ok(())
}
