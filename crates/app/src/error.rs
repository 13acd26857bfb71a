use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] engine::EngineError),
    #[error("record '{id}': {source}")]
    Record {
        id: String,
        #[source]
        source: engine::EngineError,
    },
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
}
