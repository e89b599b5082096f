//! No-op notifier for deployments without an outbound channel.

use async_trait::async_trait;

use crate::request::{
    domain::{LoanRequest, RequestStatus},
    ports::{NotifierResult, RequestNotifier},
};

/// Notifier that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl NullNotifier {
    /// Creates a no-op notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RequestNotifier for NullNotifier {
    async fn request_submitted(&self, _request: &LoanRequest) -> NotifierResult<()> {
        Ok(())
    }

    async fn status_changed(
        &self,
        _request: &LoanRequest,
        _previous: RequestStatus,
    ) -> NotifierResult<()> {
        Ok(())
    }
}
