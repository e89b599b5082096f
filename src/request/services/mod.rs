//! Application services for request lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    RequestLifecycleError, RequestLifecycleResult, RequestLifecycleService, SubmitLoanRequest,
    TransitionLoanRequest, TransitionOutcome,
};
