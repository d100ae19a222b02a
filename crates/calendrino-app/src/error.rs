use thiserror::Error;

/// Application-level errors (fetch and output)
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Fetch error: {0}")]
    FetchError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    ServiceError(#[from] calendrino_service::error::ServiceError),

    #[error(transparent)]
    RfcError(#[from] calendrino_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] calendrino_core::error::CoreError),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::FetchError(err.to_string())
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
