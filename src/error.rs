//! Domain error taxonomy shared by the persistence layer, the reward engine
//! and the HTTP boundary. Every mutation failure rolls its transaction back,
//! so callers can surface these without worrying about partial writes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Energy or coins below the required amount. The message is user-visible.
    #[error("{0}")]
    InsufficientResource(String),
    #[error("this task has already been completed")]
    AlreadyCompleted,
    #[error("{0}")]
    PrerequisiteNotMet(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("admin privileges required")]
    Unauthorized,
    #[error("question bank unavailable: {0}")]
    DataUnavailable(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;
