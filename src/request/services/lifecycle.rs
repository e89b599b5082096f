//! Service layer orchestrating request submission and transitions.

use crate::request::{
    domain::{
        ActorRole, Beneficiary, ContactDetails, DeviceKind, FulfillmentUpdate, LoanRequest,
        Logistics, NewLoanRequest, RequestDomainError, RequestId, RequestStatus, RequesterId,
        TransitionCommand,
    },
    ports::{
        DocumentError, OfficialDocument, OfficialDocumentRenderer, RequestNotifier,
        RequestRepository, RequestRepositoryError, RequestRepositoryResult,
    },
};
use mockable::Clock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;

/// Payload for submitting a new loan request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitLoanRequest {
    requester_id: RequesterId,
    beneficiary: Beneficiary,
    devices: BTreeSet<DeviceKind>,
    application_requirements: String,
    contact: ContactDetails,
    logistics: Option<Logistics>,
}

impl SubmitLoanRequest {
    /// Creates a submission payload with the required fields.
    #[must_use]
    pub fn new(
        requester_id: RequesterId,
        beneficiary: Beneficiary,
        devices: impl IntoIterator<Item = DeviceKind>,
        application_requirements: impl Into<String>,
    ) -> Self {
        Self {
            requester_id,
            beneficiary,
            devices: devices.into_iter().collect(),
            application_requirements: application_requirements.into(),
            contact: ContactDetails::new(),
            logistics: None,
        }
    }

    /// Sets contact details.
    #[must_use]
    pub fn with_contact(mut self, contact: ContactDetails) -> Self {
        self.contact = contact;
        self
    }

    /// Sets logistics details, overriding the creation defaults.
    #[must_use]
    pub fn with_logistics(mut self, logistics: Logistics) -> Self {
        self.logistics = Some(logistics);
        self
    }
}

impl From<SubmitLoanRequest> for NewLoanRequest {
    fn from(payload: SubmitLoanRequest) -> Self {
        Self {
            requester_id: payload.requester_id,
            beneficiary: payload.beneficiary,
            devices: payload.devices,
            application_requirements: payload.application_requirements,
            contact: payload.contact,
            logistics: payload.logistics,
        }
    }
}

/// Payload for transitioning an existing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionLoanRequest {
    request_id: RequestId,
    actor: ActorRole,
    target: RequestStatus,
    fulfillment: FulfillmentUpdate,
    admin_notes: Option<String>,
}

impl TransitionLoanRequest {
    /// Creates a transition payload.
    #[must_use]
    pub const fn new(request_id: RequestId, actor: ActorRole, target: RequestStatus) -> Self {
        Self {
            request_id,
            actor,
            target,
            fulfillment: FulfillmentUpdate::new(),
            admin_notes: None,
        }
    }

    /// Attaches per-device serial numbers and asset tags.
    #[must_use]
    pub fn with_fulfillment(mut self, fulfillment: FulfillmentUpdate) -> Self {
        self.fulfillment = fulfillment;
        self
    }

    /// Replaces the administrator notes, even with an empty string.
    #[must_use]
    pub fn with_admin_notes(mut self, notes: impl Into<String>) -> Self {
        self.admin_notes = Some(notes.into());
        self
    }

    /// Returns the targeted request identifier.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }
}

impl From<TransitionLoanRequest> for TransitionCommand {
    fn from(payload: TransitionLoanRequest) -> Self {
        Self {
            actor: payload.actor,
            target: payload.target,
            fulfillment: payload.fulfillment,
            admin_notes: payload.admin_notes,
        }
    }
}

/// Result of a committed transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// The request as persisted after the transition.
    pub request: LoanRequest,
    /// The official document, rendered when this transition first entered
    /// the `prepared` status.
    pub document: Option<OfficialDocument>,
}

/// Service-level errors for request lifecycle operations.
#[derive(Debug, Error)]
pub enum RequestLifecycleError {
    /// Authorization, state-machine, or validation failure.
    #[error(transparent)]
    Domain(#[from] RequestDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RequestRepositoryError),
    /// Document rendering failed after the transition committed; the
    /// status mutation stands.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Result type for request lifecycle service operations.
pub type RequestLifecycleResult<T> = Result<T, RequestLifecycleError>;

/// Request lifecycle orchestration service.
#[derive(Clone)]
pub struct RequestLifecycleService<R, D, N, C>
where
    R: RequestRepository,
    D: OfficialDocumentRenderer,
    N: RequestNotifier,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    documents: Arc<D>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<R, D, N, C> RequestLifecycleService<R, D, N, C>
where
    R: RequestRepository,
    D: OfficialDocumentRenderer,
    N: RequestNotifier,
    C: Clock + Send + Sync,
{
    /// Creates a new request lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, documents: Arc<D>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            repository,
            documents,
            notifier,
            clock,
        }
    }

    /// Submits a new request, which always starts in `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLifecycleError`] when creation validation fails or
    /// the repository rejects persistence.
    pub async fn submit(&self, payload: SubmitLoanRequest) -> RequestLifecycleResult<LoanRequest> {
        let request = LoanRequest::submit(payload.into(), &*self.clock)
            .map_err(RequestDomainError::from)?;
        self.repository.store(&request).await?;

        if self.notifier.request_submitted(&request).await.is_err() {
            // Delivery is best effort; the submission is already stored.
        }
        Ok(request)
    }

    /// Applies an administrator transition to a stored request.
    ///
    /// The read-validate-write cycle is guarded by the aggregate's version
    /// token: when a concurrent transition commits first, the update is
    /// rejected with [`RequestRepositoryError::VersionConflict`] and
    /// nothing is written. Document rendering happens after the status
    /// mutation commits, so a renderer failure surfaces as
    /// [`RequestLifecycleError::Document`] while the transition stands.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLifecycleError`] for authorization, state-machine,
    /// validation, conflict, persistence, and rendering failures.
    pub async fn transition(
        &self,
        payload: TransitionLoanRequest,
    ) -> RequestLifecycleResult<TransitionOutcome> {
        let request_id = payload.request_id();
        let mut request = self
            .repository
            .find_by_id(request_id)
            .await?
            .ok_or(RequestRepositoryError::NotFound(request_id))?;

        let command = TransitionCommand::from(payload);
        let effects = request.apply_transition(&command, &*self.clock)?;
        self.repository.update(&request).await?;

        let document = if effects.generate_document {
            Some(self.documents.render(&request).await?)
        } else {
            None
        };

        if effects.previous_status != request.status()
            && self
                .notifier
                .status_changed(&request, effects.previous_status)
                .await
                .is_err()
        {
            // Delivery is best effort; the transition is already committed.
        }

        Ok(TransitionOutcome { request, document })
    }

    /// Retrieves a request by identifier.
    ///
    /// Returns `Ok(None)` when no request exists under the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_id(
        &self,
        id: RequestId,
    ) -> RequestLifecycleResult<Option<LoanRequest>> {
        let result: RequestRepositoryResult<Option<LoanRequest>> =
            self.repository.find_by_id(id).await;
        Ok(result?)
    }

    /// Lists the requests submitted by one account, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLifecycleError::Repository`] when the lookup fails.
    pub async fn list_for_requester(
        &self,
        requester_id: RequesterId,
    ) -> RequestLifecycleResult<Vec<LoanRequest>> {
        Ok(self.repository.find_by_requester(requester_id).await?)
    }

    /// Lists every stored request, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLifecycleError::Repository`] when the lookup fails.
    pub async fn list_all(&self) -> RequestLifecycleResult<Vec<LoanRequest>> {
        Ok(self.repository.list_all().await?)
    }

    /// Returns the request count for every workflow status, including
    /// zeroes, for dashboard display.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLifecycleError::Repository`] when aggregation fails.
    pub async fn status_breakdown(
        &self,
    ) -> RequestLifecycleResult<BTreeMap<RequestStatus, u64>> {
        let counts = self.repository.status_counts().await?;
        let mut breakdown = BTreeMap::new();
        for status in RequestStatus::ALL {
            breakdown.insert(status, counts.get(&status).copied().unwrap_or(0));
        }
        Ok(breakdown)
    }
}
