use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Gazetteer error: {0}")]
    Gazetteer(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Invalid city name: {0:?}")]
    InvalidCityName(String),

    #[error("City {0:?} could not be resolved")]
    UnresolvedCity(String),

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
