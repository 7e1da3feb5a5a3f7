//! Business operations behind the HTTP routes.

use thiserror::Error;

use crate::client::validation::FieldError;
use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::storage::StorageError;

pub mod registration;
pub mod search;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("invalid value: {0}")]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("form error: {0}")]
    Form(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
