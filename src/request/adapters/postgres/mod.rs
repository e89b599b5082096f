//! `PostgreSQL` adapter implementations backed by Diesel.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresRequestRepository, RequestPgPool};
pub(crate) use repository::{row_to_request, to_changeset, to_new_row};
