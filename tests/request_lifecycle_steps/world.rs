//! Shared world state for request lifecycle BDD scenarios.

#![expect(
    clippy::expect_used,
    reason = "Scenario world setup uses expect for assertion clarity"
)]

use std::sync::Arc;

use loaner::request::{
    adapters::{MiniJinjaDocumentRenderer, NullNotifier, memory::InMemoryRequestRepository},
    domain::{DeviceKind, LoanRequest},
    services::{RequestLifecycleError, RequestLifecycleService, TransitionOutcome},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestRequestService = RequestLifecycleService<
    InMemoryRequestRepository,
    MiniJinjaDocumentRenderer,
    NullNotifier,
    DefaultClock,
>;

/// Scenario world for request lifecycle behaviour tests.
pub struct RequestLifecycleWorld {
    pub service: TestRequestService,
    pub pending_devices: Option<Vec<DeviceKind>>,
    pub current_request: Option<LoanRequest>,
    pub last_transition: Option<Result<TransitionOutcome, RequestLifecycleError>>,
}

impl RequestLifecycleWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let service = RequestLifecycleService::new(
            Arc::new(InMemoryRequestRepository::new()),
            Arc::new(MiniJinjaDocumentRenderer::new().expect("embedded template parses")),
            Arc::new(NullNotifier::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            pending_devices: None,
            current_request: None,
            last_transition: None,
        }
    }
}

impl Default for RequestLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RequestLifecycleWorld {
    RequestLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a comma-separated device list from a scenario string.
pub fn parse_devices(raw: &str) -> Result<Vec<DeviceKind>, eyre::Report> {
    raw.split(',')
        .map(|part| DeviceKind::try_from(part.trim()).map_err(eyre::Report::from))
        .collect()
}
