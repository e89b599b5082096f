//! Diesel schema for loan-request persistence.

diesel::table! {
    /// Loan-request records with workflow state and fulfillment data.
    loan_requests (id) {
        /// Request identifier.
        id -> Uuid,
        /// Submitting account identifier.
        requester_id -> Uuid,
        /// Beneficiary record payload.
        beneficiary -> Jsonb,
        /// Selected device kinds.
        devices -> Jsonb,
        /// Mandatory application-requirements text.
        application_requirements -> Text,
        /// Optional contact details payload.
        contact -> Jsonb,
        /// Pickup/return logistics payload.
        logistics -> Jsonb,
        /// Workflow status.
        #[max_length = 50]
        status -> Varchar,
        /// Per-device serial numbers.
        device_serials -> Jsonb,
        /// Per-device asset tags.
        device_asset_tags -> Jsonb,
        /// Administrator notes.
        admin_notes -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last transition timestamp.
        updated_at -> Timestamptz,
        /// Official-document generation timestamp, if generated.
        document_generated_at -> Nullable<Timestamptz>,
        /// Optimistic-concurrency token.
        version -> Int8,
    }
}
