//! Repository port for intake requests.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::intake::domain::{IntakeId, IntakeKind, IntakeRequest};

/// Result type for intake repository operations.
pub type IntakeRepositoryResult<T> = Result<T, IntakeRepositoryError>;

/// Persistence contract for intake requests.
#[async_trait]
pub trait IntakeRepository: Send + Sync {
    /// Stores a new request.
    async fn insert(&self, request: &IntakeRequest) -> IntakeRepositoryResult<()>;

    /// Finds a request by identifier.
    async fn find_by_id(&self, id: IntakeId) -> IntakeRepositoryResult<Option<IntakeRequest>>;

    /// Returns the newest requests of one kind.
    async fn list_by_kind(
        &self,
        kind: IntakeKind,
        limit: usize,
    ) -> IntakeRepositoryResult<Vec<IntakeRequest>>;
}

/// Errors returned by intake repository implementations.
#[derive(Debug, Clone, Error)]
pub enum IntakeRepositoryError {
    /// A request with the same id already exists.
    #[error("duplicate intake request: {0}")]
    Duplicate(IntakeId),

    /// Persisted data could not be converted into domain types.
    #[error("invalid persisted intake data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Storage failed underneath the operation.
    #[error("intake persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IntakeRepositoryError {
    /// Wraps a conversion failure.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a storage failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
