//! Adapter implementations of the request ports.

mod document;
pub mod memory;
mod notifier;
pub mod postgres;

pub use document::MiniJinjaDocumentRenderer;
pub use notifier::NullNotifier;
