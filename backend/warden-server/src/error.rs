use warden_config::ConfigError;
use warden_db::DbError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("Metrics exporter error: {message}")]
    Metrics { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
