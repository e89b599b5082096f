//! Port for official loan-document generation.

use crate::request::domain::{LoanRequest, RequestId};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Rendered official document confirming a loan.
///
/// How the artifact is stored and served back to users is the outer
/// layer's concern; the core only carries the content it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficialDocument {
    /// Request the document belongs to.
    pub request_id: RequestId,
    /// Rendered document body.
    pub content: String,
}

/// Errors returned by document renderer implementations.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The template engine rejected the request snapshot.
    #[error("document rendering failed: {0}")]
    Render(String),
}

/// Contract for rendering the official loan document.
///
/// Invoked at most once per request, with a read-only snapshot, after the
/// triggering status mutation has been committed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfficialDocumentRenderer: Send + Sync {
    /// Renders the official document for a request snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Render`] when the snapshot cannot be
    /// rendered.
    async fn render(&self, request: &LoanRequest) -> DocumentResult<OfficialDocument>;
}
