use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrelloError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Trello API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Precondition(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TrelloError {
    /// HTTP status of an upstream failure, if this error came from Trello.
    pub fn status(&self) -> Option<u16> {
        match self {
            TrelloError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, TrelloError::Precondition(_))
    }

    /// Whether the caller, not Trello or the network, is at fault.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            TrelloError::Precondition(_) | TrelloError::Validation(_)
        )
    }
}
