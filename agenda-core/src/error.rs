//! Error types for agenda.

use thiserror::Error;

use crate::event::EventId;

/// Errors that can occur in agenda operations.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Event not found: {0}")]
    NotFound(EventId),

    /// Raised by callers before handing data to the store; the store itself
    /// never validates.
    #[error("Invalid event: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
