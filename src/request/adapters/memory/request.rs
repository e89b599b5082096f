//! In-memory repository for request lifecycle tests and tooling.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::request::{
    domain::{LoanRequest, RequestId, RequestStatus, RequesterId},
    ports::{RequestRepository, RequestRepositoryError, RequestRepositoryResult},
};

/// Thread-safe in-memory request repository with version compare-and-set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRequestRepository {
    state: Arc<RwLock<InMemoryRequestState>>,
}

#[derive(Debug, Default)]
struct InMemoryRequestState {
    requests: HashMap<RequestId, LoanRequest>,
    requester_index: HashMap<RequesterId, Vec<RequestId>>,
}

impl InMemoryRequestRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Sorts requests newest first, matching the listing contract.
fn newest_first(requests: &mut [LoanRequest]) {
    requests.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}

#[async_trait]
impl RequestRepository for InMemoryRequestRepository {
    async fn store(&self, request: &LoanRequest) -> RequestRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            RequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.requests.contains_key(&request.id()) {
            return Err(RequestRepositoryError::DuplicateRequest(request.id()));
        }

        state
            .requester_index
            .entry(request.requester_id())
            .or_default()
            .push(request.id());
        state.requests.insert(request.id(), request.clone());
        Ok(())
    }

    async fn update(&self, request: &LoanRequest) -> RequestRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            RequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let stored = state
            .requests
            .get(&request.id())
            .ok_or(RequestRepositoryError::NotFound(request.id()))?;

        // The incoming aggregate's token must be exactly one ahead of the
        // stored row; anything else means another transition won the race.
        if stored.version() + 1 != request.version() {
            return Err(RequestRepositoryError::VersionConflict { id: request.id() });
        }

        state.requests.insert(request.id(), request.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: RequestId) -> RequestRepositoryResult<Option<LoanRequest>> {
        let state = self.state.read().map_err(|err| {
            RequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.requests.get(&id).cloned())
    }

    async fn find_by_requester(
        &self,
        requester_id: RequesterId,
    ) -> RequestRepositoryResult<Vec<LoanRequest>> {
        let state = self.state.read().map_err(|err| {
            RequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut requests: Vec<LoanRequest> = state
            .requester_index
            .get(&requester_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.requests.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        newest_first(&mut requests);
        Ok(requests)
    }

    async fn list_all(&self) -> RequestRepositoryResult<Vec<LoanRequest>> {
        let state = self.state.read().map_err(|err| {
            RequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut requests: Vec<LoanRequest> = state.requests.values().cloned().collect();
        newest_first(&mut requests);
        Ok(requests)
    }

    async fn status_counts(&self) -> RequestRepositoryResult<BTreeMap<RequestStatus, u64>> {
        let state = self.state.read().map_err(|err| {
            RequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut counts: BTreeMap<RequestStatus, u64> = BTreeMap::new();
        for request in state.requests.values() {
            *counts.entry(request.status()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
