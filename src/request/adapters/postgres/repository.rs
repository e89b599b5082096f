//! `PostgreSQL` repository implementation for loan-request storage.

use super::{
    models::{LoanRequestChangeset, LoanRequestRow, NewLoanRequestRow},
    schema::loan_requests,
};
use crate::request::{
    domain::{
        LoanRequest, PersistedLoanRequestData, RequestId, RequestStatus, RequesterId,
    },
    ports::{RequestRepository, RequestRepositoryError, RequestRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::BTreeMap;

/// `PostgreSQL` connection pool type used by request adapters.
pub type RequestPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed request repository.
#[derive(Debug, Clone)]
pub struct PostgresRequestRepository {
    pool: RequestPgPool,
}

impl PostgresRequestRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RequestPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RequestRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RequestRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RequestRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RequestRepositoryError::persistence)?
    }
}

#[async_trait]
impl RequestRepository for PostgresRequestRepository {
    async fn store(&self, request: &LoanRequest) -> RequestRepositoryResult<()> {
        let request_id = request.id();
        let new_row = to_new_row(request)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(loan_requests::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RequestRepositoryError::DuplicateRequest(request_id)
                    }
                    _ => RequestRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, request: &LoanRequest) -> RequestRepositoryResult<()> {
        let request_id = request.id();
        let expected_version = i64::from(request.version()) - 1;
        let changeset = to_changeset(request)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                loan_requests::table
                    .filter(loan_requests::id.eq(request_id.into_inner()))
                    .filter(loan_requests::version.eq(expected_version)),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(RequestRepositoryError::persistence)?;

            if affected == 1 {
                return Ok(());
            }

            // Zero rows: either the request vanished or another transition
            // bumped the version first. Disambiguate for the caller.
            let exists: i64 = loan_requests::table
                .filter(loan_requests::id.eq(request_id.into_inner()))
                .select(count_star())
                .first(connection)
                .map_err(RequestRepositoryError::persistence)?;
            if exists == 0 {
                Err(RequestRepositoryError::NotFound(request_id))
            } else {
                Err(RequestRepositoryError::VersionConflict { id: request_id })
            }
        })
        .await
    }

    async fn find_by_id(&self, id: RequestId) -> RequestRepositoryResult<Option<LoanRequest>> {
        self.run_blocking(move |connection| {
            let row = loan_requests::table
                .filter(loan_requests::id.eq(id.into_inner()))
                .select(LoanRequestRow::as_select())
                .first::<LoanRequestRow>(connection)
                .optional()
                .map_err(RequestRepositoryError::persistence)?;
            row.map(row_to_request).transpose()
        })
        .await
    }

    async fn find_by_requester(
        &self,
        requester_id: RequesterId,
    ) -> RequestRepositoryResult<Vec<LoanRequest>> {
        self.run_blocking(move |connection| {
            let rows = loan_requests::table
                .filter(loan_requests::requester_id.eq(requester_id.into_inner()))
                .order(loan_requests::created_at.desc())
                .select(LoanRequestRow::as_select())
                .load::<LoanRequestRow>(connection)
                .map_err(RequestRepositoryError::persistence)?;
            rows.into_iter().map(row_to_request).collect()
        })
        .await
    }

    async fn list_all(&self) -> RequestRepositoryResult<Vec<LoanRequest>> {
        self.run_blocking(move |connection| {
            let rows = loan_requests::table
                .order(loan_requests::created_at.desc())
                .select(LoanRequestRow::as_select())
                .load::<LoanRequestRow>(connection)
                .map_err(RequestRepositoryError::persistence)?;
            rows.into_iter().map(row_to_request).collect()
        })
        .await
    }

    async fn status_counts(&self) -> RequestRepositoryResult<BTreeMap<RequestStatus, u64>> {
        self.run_blocking(move |connection| {
            let rows: Vec<(String, i64)> = loan_requests::table
                .group_by(loan_requests::status)
                .select((loan_requests::status, count_star()))
                .load(connection)
                .map_err(RequestRepositoryError::persistence)?;

            let mut counts = BTreeMap::new();
            for (status, row_count) in rows {
                let parsed = RequestStatus::try_from(status.as_str())
                    .map_err(RequestRepositoryError::persistence)?;
                let total =
                    u64::try_from(row_count).map_err(RequestRepositoryError::persistence)?;
                counts.insert(parsed, total);
            }
            Ok(counts)
        })
        .await
    }
}

pub(crate) fn to_new_row(request: &LoanRequest) -> RequestRepositoryResult<NewLoanRequestRow> {
    Ok(NewLoanRequestRow {
        id: request.id().into_inner(),
        requester_id: request.requester_id().into_inner(),
        beneficiary: to_json(request.beneficiary())?,
        devices: to_json(request.devices())?,
        application_requirements: request.application_requirements().to_owned(),
        contact: to_json(request.contact())?,
        logistics: to_json(request.logistics())?,
        status: request.status().as_str().to_owned(),
        device_serials: to_json(request.device_serials())?,
        device_asset_tags: to_json(request.device_asset_tags())?,
        admin_notes: request.admin_notes().to_owned(),
        created_at: request.created_at(),
        updated_at: request.updated_at(),
        document_generated_at: request.document_generated_at(),
        version: i64::from(request.version()),
    })
}

pub(crate) fn to_changeset(request: &LoanRequest) -> RequestRepositoryResult<LoanRequestChangeset> {
    Ok(LoanRequestChangeset {
        status: request.status().as_str().to_owned(),
        device_serials: to_json(request.device_serials())?,
        device_asset_tags: to_json(request.device_asset_tags())?,
        admin_notes: request.admin_notes().to_owned(),
        updated_at: request.updated_at(),
        document_generated_at: request.document_generated_at(),
        version: i64::from(request.version()),
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> RequestRepositoryResult<serde_json::Value> {
    serde_json::to_value(value).map_err(RequestRepositoryError::persistence)
}

pub(crate) fn row_to_request(row: LoanRequestRow) -> RequestRepositoryResult<LoanRequest> {
    let status = RequestStatus::try_from(row.status.as_str())
        .map_err(RequestRepositoryError::persistence)?;
    let version = u32::try_from(row.version).map_err(RequestRepositoryError::persistence)?;

    Ok(LoanRequest::from_persisted(PersistedLoanRequestData {
        id: RequestId::from_uuid(row.id),
        requester_id: RequesterId::from_uuid(row.requester_id),
        beneficiary: from_json(row.beneficiary)?,
        devices: from_json(row.devices)?,
        application_requirements: row.application_requirements,
        contact: from_json(row.contact)?,
        logistics: from_json(row.logistics)?,
        status,
        device_serials: from_json(row.device_serials)?,
        device_asset_tags: from_json(row.device_asset_tags)?,
        admin_notes: row.admin_notes,
        created_at: row.created_at,
        updated_at: row.updated_at,
        document_generated_at: row.document_generated_at,
        version,
    }))
}

fn from_json<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
) -> RequestRepositoryResult<T> {
    serde_json::from_value(value).map_err(RequestRepositoryError::persistence)
}
