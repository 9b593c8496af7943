use crate::domain::order::InvalidOrder;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<InvalidOrder> for ServiceError {
    fn from(e: InvalidOrder) -> Self { Self::Validation(e.to_string()) }
}
