//! Behaviour tests for the loan-request lifecycle workflow.

#[path = "request_lifecycle_steps/mod.rs"]
mod request_lifecycle_steps_defs;

use request_lifecycle_steps_defs::world::{RequestLifecycleWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/request_lifecycle.feature",
    name = "Submitting a request starts it pending"
)]
#[tokio::test(flavor = "multi_thread")]
async fn submission_starts_pending(world: RequestLifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/request_lifecycle.feature",
    name = "Approving a tablet request with a serial number"
)]
#[tokio::test(flavor = "multi_thread")]
async fn approval_with_serial(world: RequestLifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/request_lifecycle.feature",
    name = "Preparation generates the official document"
)]
#[tokio::test(flavor = "multi_thread")]
async fn preparation_generates_document(world: RequestLifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/request_lifecycle.feature",
    name = "Skipping approval is rejected"
)]
#[tokio::test(flavor = "multi_thread")]
async fn skipping_approval_rejected(world: RequestLifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/request_lifecycle.feature",
    name = "A malformed asset tag is rejected"
)]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_asset_tag_rejected(world: RequestLifecycleWorld) {
    let _ = world;
}
