use thiserror::Error;

use super::validation::ValidationErrors;
use super::value_objects::TeamId;
use crate::domain::repositories::RepositoryError;

/// Failures surfaced by team operations
#[derive(Debug, Error)]
pub enum TeamError {
    /// Malformed or missing input fields
    #[error("invalid input: {0}")]
    Validation(ValidationErrors),

    /// The identity token is not well formed
    #[error("{0}")]
    InvalidIdentity(String),

    /// Well-formed identity with no matching record
    #[error("team not found: {0}")]
    NotFound(TeamId),

    /// The store could not be reached in time
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("unexpected failure: {0}")]
    Unknown(String),
}

impl From<ValidationErrors> for TeamError {
    fn from(errors: ValidationErrors) -> Self {
        TeamError::Validation(errors)
    }
}

impl From<RepositoryError> for TeamError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => TeamError::NotFound(id),
            RepositoryError::StoreUnavailable(detail) => TeamError::StoreUnavailable(detail),
            RepositoryError::Unknown(detail) => TeamError::Unknown(detail),
        }
    }
}
