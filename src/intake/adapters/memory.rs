//! In-memory intake repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::intake::{
    domain::{IntakeId, IntakeKind, IntakeRequest},
    ports::{IntakeRepository, IntakeRepositoryError, IntakeRepositoryResult},
};

/// Thread-safe in-memory intake repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIntakeRepository {
    requests: Arc<RwLock<HashMap<IntakeId, IntakeRequest>>>,
}

impl InMemoryIntakeRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> IntakeRepositoryError {
    IntakeRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl IntakeRepository for InMemoryIntakeRepository {
    async fn insert(&self, request: &IntakeRequest) -> IntakeRepositoryResult<()> {
        let mut requests = self.requests.write().map_err(poisoned)?;
        if requests.contains_key(&request.id()) {
            return Err(IntakeRepositoryError::Duplicate(request.id()));
        }
        requests.insert(request.id(), request.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: IntakeId) -> IntakeRepositoryResult<Option<IntakeRequest>> {
        let requests = self.requests.read().map_err(poisoned)?;
        Ok(requests.get(&id).cloned())
    }

    async fn list_by_kind(
        &self,
        kind: IntakeKind,
        limit: usize,
    ) -> IntakeRepositoryResult<Vec<IntakeRequest>> {
        let requests = self.requests.read().map_err(poisoned)?;
        let mut matching: Vec<IntakeRequest> = requests
            .values()
            .filter(|request| request.kind() == kind)
            .cloned()
            .collect();
        matching.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| right.id().cmp(&left.id()))
        });
        matching.truncate(limit);
        Ok(matching)
    }
}
