//! Services coordinating print workflows.

use thiserror::Error;

use crate::errors::TemplateError;
use crate::repository::errors::RepositoryError;

pub mod print;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Print template not found")]
    NotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
