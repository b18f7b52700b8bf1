//! Error types for Spendwise

use thiserror::Error;

/// Alert shown for any failed remote operation
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum Error {
    /// Bad user input, caught before any remote call
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a non-success status
    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// The remote could not be reached at all
    #[error("Remote unavailable: {0}")]
    Unavailable(String),

    /// Update/delete target is missing or owned by someone else.
    /// The remote does not say which.
    #[error("Not found or not authorized: {0}")]
    NotFoundOrUnauthorized(String),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("No pending confirmation for this token")]
    StaleConfirmation,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// True for failures of the remote round-trip itself
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Remote { .. }
                | Self::Unavailable(_)
                | Self::NotFoundOrUnauthorized(_)
                | Self::Json(_)
        )
    }

    /// Text for the user-facing alert.
    ///
    /// Validation messages are shown verbatim; transport and authorization
    /// failures collapse into one generic alert.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Unauthenticated => "Please log in to continue.".to_string(),
            Self::StaleConfirmation => "That action is no longer pending.".to_string(),
            Self::NotFound(what) => format!("Not found: {}", what),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(Error::Unavailable("down".into()).is_transport());
        assert!(Error::NotFoundOrUnauthorized("7".into()).is_transport());
        assert!(Error::Remote {
            status: 500,
            message: "Server Error".into()
        }
        .is_transport());
        assert!(!Error::Validation("empty".into()).is_transport());
        assert!(!Error::Unauthenticated.is_transport());
    }

    #[test]
    fn test_user_message() {
        let err = Error::Validation("Please add a text, amount, and date".into());
        assert_eq!(err.user_message(), "Please add a text, amount, and date");

        // Missing and not-owned look the same to the user
        let missing = Error::NotFoundOrUnauthorized("7".into());
        let failed = Error::Remote {
            status: 500,
            message: "Server Error".into(),
        };
        assert_eq!(missing.user_message(), failed.user_message());
        assert_eq!(missing.user_message(), GENERIC_FAILURE_MESSAGE);
    }
}
