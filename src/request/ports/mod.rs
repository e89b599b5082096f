//! Port contracts for the loan-request lifecycle.
//!
//! Ports define infrastructure-agnostic interfaces used by the lifecycle
//! service.

pub mod document;
pub mod notifier;
pub mod repository;

pub use document::{DocumentError, DocumentResult, OfficialDocument, OfficialDocumentRenderer};
pub use notifier::{NotifierError, NotifierResult, RequestNotifier};
pub use repository::{RequestRepository, RequestRepositoryError, RequestRepositoryResult};
