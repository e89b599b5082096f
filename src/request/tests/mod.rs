//! Unit tests for the request lifecycle.

mod state_transition_tests;
