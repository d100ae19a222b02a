use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    RfcError(#[from] calendrino_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] calendrino_core::error::CoreError),

    /// Recurrence rule text that cannot be parsed or evaluated.
    #[error("Recurrence error: {0}")]
    RecurrenceError(String),

    /// Page template without exactly one calendar marker.
    #[error("Template error: {0}")]
    TemplateError(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
