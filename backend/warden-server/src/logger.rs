use crate::error::{Result as ServerErrorResult, ServerError};

use warden_config::LogLevel;

use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;

/// Initialize logger with fern
///
/// # Arguments
/// * `log_level` - Log level filter
/// * `log_file` - Optional path to log file. None = stdout, Some = file output
/// * `colored` - Enable colored output (ignored when logging to file)
pub fn initialize(
    log_level: LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = log_level.0;

    let dispatch = match (&log_file, colored) {
        (Some(log_path), _) => {
            let file = fern::log_file(log_path).map_err(|e| ServerError::Io {
                path: log_path.display().to_string(),
                source: e,
            })?;
            plain_dispatch().chain(file)
        }
        (None, true) => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{} - {}] {} [{}]",
                        humantime::format_rfc3339(SystemTime::now()),
                        colors.color(record.level()),
                        message,
                        record.target(),
                    ))
                })
                .chain(std::io::stdout())
        }
        // Plain output for systemd / docker logs
        (None, false) => plain_dispatch().chain(std::io::stdout()),
    };

    Dispatch::new()
        .level(level_filter)
        // sqlx logs every statement at info
        .level_for("sqlx", log::LevelFilter::Warn)
        .chain(dispatch)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match log_file {
        Some(ref path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stdout", level_filter),
    }

    Ok(())
}

fn plain_dispatch() -> Dispatch {
    Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "[{} - {}] {} [{}]",
            humantime::format_rfc3339(SystemTime::now()),
            record.level(),
            message,
            record.target(),
        ))
    })
}
