use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] config::ConfigError),

    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid series: {0}")]
    InvalidSeries(String),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("invalid order: {0}")]
    InvalidOrder(String),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("other: {0}")]
    Other(String),
}

pub type AppResult<T, E = AppError> = Result<T, E>;
