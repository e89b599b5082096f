//! Repository port for loan-request persistence and lookup.

use crate::request::domain::{LoanRequest, RequestId, RequestStatus, RequesterId};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for request repository operations.
pub type RequestRepositoryResult<T> = Result<T, RequestRepositoryError>;

/// Loan-request persistence contract.
///
/// Updates use optimistic concurrency: the aggregate's version token must
/// be exactly one ahead of the stored row, otherwise the write is rejected
/// with [`RequestRepositoryError::VersionConflict`] and the caller must
/// re-fetch before retrying. Transitions on distinct requests never
/// contend with each other.
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Stores a newly submitted request.
    ///
    /// # Errors
    ///
    /// Returns [`RequestRepositoryError::DuplicateRequest`] when the
    /// identifier already exists.
    async fn store(&self, request: &LoanRequest) -> RequestRepositoryResult<()>;

    /// Persists a transitioned request under compare-and-set semantics.
    ///
    /// # Errors
    ///
    /// Returns [`RequestRepositoryError::NotFound`] when the request does
    /// not exist and [`RequestRepositoryError::VersionConflict`] when a
    /// concurrent transition committed first.
    async fn update(&self, request: &LoanRequest) -> RequestRepositoryResult<()>;

    /// Finds a request by identifier.
    ///
    /// Returns `None` when the request does not exist.
    async fn find_by_id(&self, id: RequestId) -> RequestRepositoryResult<Option<LoanRequest>>;

    /// Returns all requests submitted by the given account, newest first.
    async fn find_by_requester(
        &self,
        requester_id: RequesterId,
    ) -> RequestRepositoryResult<Vec<LoanRequest>>;

    /// Returns every stored request, newest first.
    async fn list_all(&self) -> RequestRepositoryResult<Vec<LoanRequest>>;

    /// Returns the number of requests per workflow status. Statuses with
    /// no requests are omitted.
    async fn status_counts(&self) -> RequestRepositoryResult<BTreeMap<RequestStatus, u64>>;
}

/// Errors returned by request repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RequestRepositoryError {
    /// A request with the same identifier already exists.
    #[error("duplicate request identifier: {0}")]
    DuplicateRequest(RequestId),

    /// The request was not found.
    #[error("request not found: {0}")]
    NotFound(RequestId),

    /// A concurrent transition committed between this attempt's read and
    /// write. The caller should re-fetch and retry against the new status.
    #[error("request {id} was modified concurrently; re-fetch and retry")]
    VersionConflict {
        /// Identifier of the contended request.
        id: RequestId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RequestRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
