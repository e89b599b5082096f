//! Port for outbound state-change notifications.

use crate::request::domain::{LoanRequest, RequestStatus};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for notification delivery.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Errors returned by notifier implementations.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// The downstream channel rejected or failed the delivery.
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Contract for notifying external systems about request events.
///
/// Delivery is best effort: the lifecycle service never rolls back a
/// committed submission or transition because a notification failed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestNotifier: Send + Sync {
    /// Announces a newly submitted request.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] when delivery fails.
    async fn request_submitted(&self, request: &LoanRequest) -> NotifierResult<()>;

    /// Announces a committed status change.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] when delivery fails.
    async fn status_changed(
        &self,
        request: &LoanRequest,
        previous: RequestStatus,
    ) -> NotifierResult<()>;
}
