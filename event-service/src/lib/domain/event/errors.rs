use thiserror::Error;

/// Error for EventTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventTitleError {
    #[error("Title must not be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for event operations
#[derive(Debug, Clone, Error)]
pub enum EventError {
    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] EventTitleError),

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Event {0} belongs to another user")]
    NotOwner(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
