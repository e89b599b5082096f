//! In-memory adapter implementations.

mod request;

pub use request::InMemoryRequestRepository;
