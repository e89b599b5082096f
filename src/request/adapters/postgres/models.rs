//! Diesel row models for loan-request persistence.

use super::schema::loan_requests;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for loan-request records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = loan_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LoanRequestRow {
    /// Request identifier.
    pub id: uuid::Uuid,
    /// Submitting account identifier.
    pub requester_id: uuid::Uuid,
    /// Beneficiary JSON payload.
    pub beneficiary: Value,
    /// Device-set JSON payload.
    pub devices: Value,
    /// Application-requirements text.
    pub application_requirements: String,
    /// Contact JSON payload.
    pub contact: Value,
    /// Logistics JSON payload.
    pub logistics: Value,
    /// Workflow status.
    pub status: String,
    /// Serial-number map JSON payload.
    pub device_serials: Value,
    /// Asset-tag map JSON payload.
    pub device_asset_tags: Value,
    /// Administrator notes.
    pub admin_notes: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last transition timestamp.
    pub updated_at: DateTime<Utc>,
    /// Document-generation timestamp, if any.
    pub document_generated_at: Option<DateTime<Utc>>,
    /// Optimistic-concurrency token.
    pub version: i64,
}

/// Insert model for loan-request records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = loan_requests)]
pub struct NewLoanRequestRow {
    /// Request identifier.
    pub id: uuid::Uuid,
    /// Submitting account identifier.
    pub requester_id: uuid::Uuid,
    /// Beneficiary JSON payload.
    pub beneficiary: Value,
    /// Device-set JSON payload.
    pub devices: Value,
    /// Application-requirements text.
    pub application_requirements: String,
    /// Contact JSON payload.
    pub contact: Value,
    /// Logistics JSON payload.
    pub logistics: Value,
    /// Workflow status.
    pub status: String,
    /// Serial-number map JSON payload.
    pub device_serials: Value,
    /// Asset-tag map JSON payload.
    pub device_asset_tags: Value,
    /// Administrator notes.
    pub admin_notes: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last transition timestamp.
    pub updated_at: DateTime<Utc>,
    /// Document-generation timestamp, if any.
    pub document_generated_at: Option<DateTime<Utc>>,
    /// Optimistic-concurrency token.
    pub version: i64,
}

/// Changeset applied when a transition commits.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = loan_requests)]
pub struct LoanRequestChangeset {
    /// Workflow status.
    pub status: String,
    /// Serial-number map JSON payload.
    pub device_serials: Value,
    /// Asset-tag map JSON payload.
    pub device_asset_tags: Value,
    /// Administrator notes.
    pub admin_notes: String,
    /// Last transition timestamp.
    pub updated_at: DateTime<Utc>,
    /// Document-generation timestamp, if any.
    pub document_generated_at: Option<DateTime<Utc>>,
    /// Optimistic-concurrency token.
    pub version: i64,
}
