//! Loan-request aggregate root and the lifecycle engine.

use super::{
    ActorRole, AssetTag, Beneficiary, ContactDetails, DeviceKind, FulfillmentUpdate, Logistics,
    RequestDomainError, RequestId, RequestStatus, RequestValidationError, RequesterId,
    fulfillment::{merge_asset_tags, merge_serials},
};
use crate::request::validation::rules;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Creation payload for a new loan request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLoanRequest {
    /// Account submitting the request.
    pub requester_id: RequesterId,
    /// Person the equipment is for.
    pub beneficiary: Beneficiary,
    /// Selected device kinds; must be non-empty.
    pub devices: BTreeSet<DeviceKind>,
    /// Mandatory free-text application requirements.
    pub application_requirements: String,
    /// Optional contact details.
    pub contact: ContactDetails,
    /// Pickup/return logistics; defaulted when not supplied.
    pub logistics: Option<Logistics>,
}

/// Administrator command applied by the lifecycle engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionCommand {
    /// Role of the authenticated caller.
    pub actor: ActorRole,
    /// Status the transition targets; may equal the current status for a
    /// notes-only update.
    pub target: RequestStatus,
    /// Per-device identifiers supplied with the transition.
    pub fulfillment: FulfillmentUpdate,
    /// Replacement administrator notes. `Some("")` clears the notes;
    /// `None` leaves them untouched.
    pub admin_notes: Option<String>,
}

impl TransitionCommand {
    /// Creates a command with an empty fulfillment update and no notes.
    #[must_use]
    pub const fn new(actor: ActorRole, target: RequestStatus) -> Self {
        Self {
            actor,
            target,
            fulfillment: FulfillmentUpdate::new(),
            admin_notes: None,
        }
    }

    /// Attaches a fulfillment update.
    #[must_use]
    pub fn with_fulfillment(mut self, fulfillment: FulfillmentUpdate) -> Self {
        self.fulfillment = fulfillment;
        self
    }

    /// Replaces the administrator notes.
    #[must_use]
    pub fn with_admin_notes(mut self, notes: impl Into<String>) -> Self {
        self.admin_notes = Some(notes.into());
        self
    }
}

/// Side effects a committed transition instructs the caller to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEffects {
    /// Status the request held before the transition.
    pub previous_status: RequestStatus,
    /// True when the official loan document must now be generated. Set at
    /// most once over a request's lifetime.
    pub generate_document: bool,
}

/// Parameter object for reconstructing a persisted request aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedLoanRequestData {
    /// Persisted request identifier.
    pub id: RequestId,
    /// Persisted requester account.
    pub requester_id: RequesterId,
    /// Persisted beneficiary record.
    pub beneficiary: Beneficiary,
    /// Persisted device set.
    pub devices: BTreeSet<DeviceKind>,
    /// Persisted application requirements.
    pub application_requirements: String,
    /// Persisted contact details.
    pub contact: ContactDetails,
    /// Persisted logistics details.
    pub logistics: Logistics,
    /// Persisted workflow status.
    pub status: RequestStatus,
    /// Persisted per-device serial numbers.
    pub device_serials: BTreeMap<DeviceKind, String>,
    /// Persisted per-device asset tags.
    pub device_asset_tags: BTreeMap<DeviceKind, AssetTag>,
    /// Persisted administrator notes.
    pub admin_notes: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted document-generation timestamp, if any.
    pub document_generated_at: Option<DateTime<Utc>>,
    /// Persisted optimistic-concurrency token.
    pub version: u32,
}

/// Loan-request aggregate root.
///
/// The workflow status is mutated exclusively through
/// [`LoanRequest::apply_transition`]; every other field set after creation
/// is written on the same path, so a failed transition leaves the
/// aggregate untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    id: RequestId,
    requester_id: RequesterId,
    beneficiary: Beneficiary,
    devices: BTreeSet<DeviceKind>,
    application_requirements: String,
    contact: ContactDetails,
    logistics: Logistics,
    status: RequestStatus,
    device_serials: BTreeMap<DeviceKind, String>,
    device_asset_tags: BTreeMap<DeviceKind, AssetTag>,
    admin_notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    document_generated_at: Option<DateTime<Utc>>,
    version: u32,
}

impl LoanRequest {
    /// Creates a new request in the `pending` status.
    ///
    /// # Errors
    ///
    /// Returns [`RequestValidationError`] when the beneficiary lacks a
    /// mandatory field, the device set is empty, or the application
    /// requirements are blank.
    pub fn submit(
        new: NewLoanRequest,
        clock: &impl Clock,
    ) -> Result<Self, RequestValidationError> {
        rules::check_beneficiary(&new.beneficiary)?;
        rules::check_device_set(&new.devices)?;
        rules::check_application_requirements(&new.application_requirements)?;

        let timestamp = clock.utc();
        Ok(Self {
            id: RequestId::new(),
            requester_id: new.requester_id,
            beneficiary: new.beneficiary,
            devices: new.devices,
            application_requirements: new.application_requirements,
            contact: new.contact,
            logistics: new.logistics.unwrap_or_default(),
            status: RequestStatus::Pending,
            device_serials: BTreeMap::new(),
            device_asset_tags: BTreeMap::new(),
            admin_notes: String::new(),
            created_at: timestamp,
            updated_at: timestamp,
            document_generated_at: None,
            version: 0,
        })
    }

    /// Reconstructs a request from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedLoanRequestData) -> Self {
        Self {
            id: data.id,
            requester_id: data.requester_id,
            beneficiary: data.beneficiary,
            devices: data.devices,
            application_requirements: data.application_requirements,
            contact: data.contact,
            logistics: data.logistics,
            status: data.status,
            device_serials: data.device_serials,
            device_asset_tags: data.device_asset_tags,
            admin_notes: data.admin_notes,
            created_at: data.created_at,
            updated_at: data.updated_at,
            document_generated_at: data.document_generated_at,
            version: data.version,
        }
    }

    /// Applies an administrator transition.
    ///
    /// Every check runs before the first mutation, so the aggregate is
    /// unchanged whenever an error is returned. A command whose target
    /// equals the current status is a notes-only re-assertion; it bypasses
    /// the adjacency rule but still re-runs the serial and asset-tag
    /// checks on whatever identifiers it supplies.
    ///
    /// # Errors
    ///
    /// Returns [`RequestDomainError::NotAuthorized`] for non-administrator
    /// actors, [`RequestDomainError::InvalidStatusTransition`] when the
    /// workflow graph has no edge to the target, and
    /// [`RequestDomainError::Validation`] when a supplied identifier fails
    /// its rule.
    pub fn apply_transition(
        &mut self,
        command: &TransitionCommand,
        clock: &impl Clock,
    ) -> Result<TransitionEffects, RequestDomainError> {
        if !command.actor.is_administrator() {
            return Err(RequestDomainError::NotAuthorized {
                role: command.actor,
            });
        }

        let target = command.target;
        if target != self.status && !self.status.can_transition_to(target) {
            return Err(RequestDomainError::InvalidStatusTransition {
                from: self.status,
                to: target,
            });
        }

        for device in command.fulfillment.serials().keys() {
            self.check_device_selected(*device)?;
        }

        for device in &self.devices {
            let merged = command.fulfillment.merged_serial(&self.device_serials, *device);
            rules::check_serial_recorded(*device, merged, target)
                .map_err(RequestDomainError::Validation)?;
        }

        let validated_tags = self.validate_asset_tags(&command.fulfillment)?;

        // All checks passed; mutate.
        merge_serials(&mut self.device_serials, command.fulfillment.serials());
        merge_asset_tags(&mut self.device_asset_tags, &validated_tags);
        if let Some(notes) = &command.admin_notes {
            self.admin_notes.clone_from(notes);
        }

        let previous_status = self.status;
        self.status = target;

        let generate_document =
            target == RequestStatus::Prepared && self.document_generated_at.is_none();
        if generate_document {
            self.document_generated_at = Some(clock.utc());
        }

        self.updated_at = clock.utc();
        self.version += 1;

        Ok(TransitionEffects {
            previous_status,
            generate_document,
        })
    }

    /// Validates every supplied asset tag and returns the typed map to
    /// merge.
    fn validate_asset_tags(
        &self,
        fulfillment: &FulfillmentUpdate,
    ) -> Result<BTreeMap<DeviceKind, AssetTag>, RequestDomainError> {
        let mut validated = BTreeMap::new();
        for (device, raw) in fulfillment.asset_tags() {
            self.check_device_selected(*device)?;
            rules::check_asset_tag(*device, raw).map_err(RequestDomainError::Validation)?;
            let tag = AssetTag::new(raw.clone()).map_err(|err| {
                RequestDomainError::Validation(RequestValidationError::MalformedAssetTag {
                    device: *device,
                    value: err.0,
                })
            })?;
            validated.insert(*device, tag);
        }
        Ok(validated)
    }

    /// Rejects identifiers supplied for device kinds outside the request's
    /// set, keeping the map-key invariant.
    fn check_device_selected(&self, device: DeviceKind) -> Result<(), RequestDomainError> {
        if self.devices.contains(&device) {
            Ok(())
        } else {
            Err(RequestDomainError::Validation(
                RequestValidationError::UnknownDevice { device },
            ))
        }
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the submitting account.
    #[must_use]
    pub const fn requester_id(&self) -> RequesterId {
        self.requester_id
    }

    /// Returns the beneficiary record.
    #[must_use]
    pub const fn beneficiary(&self) -> &Beneficiary {
        &self.beneficiary
    }

    /// Returns the selected device kinds.
    #[must_use]
    pub const fn devices(&self) -> &BTreeSet<DeviceKind> {
        &self.devices
    }

    /// Returns the application-requirements text.
    #[must_use]
    pub fn application_requirements(&self) -> &str {
        &self.application_requirements
    }

    /// Returns the contact details.
    #[must_use]
    pub const fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    /// Returns the logistics details.
    #[must_use]
    pub const fn logistics(&self) -> &Logistics {
        &self.logistics
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// Returns the recorded per-device serial numbers.
    #[must_use]
    pub const fn device_serials(&self) -> &BTreeMap<DeviceKind, String> {
        &self.device_serials
    }

    /// Returns the recorded per-device asset tags.
    #[must_use]
    pub const fn device_asset_tags(&self) -> &BTreeMap<DeviceKind, AssetTag> {
        &self.device_asset_tags
    }

    /// Returns the administrator notes.
    #[must_use]
    pub fn admin_notes(&self) -> &str {
        &self.admin_notes
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns when the official document was generated, if it has been.
    #[must_use]
    pub const fn document_generated_at(&self) -> Option<DateTime<Utc>> {
        self.document_generated_at
    }

    /// Returns the optimistic-concurrency token. Bumped by every committed
    /// transition; repositories reject writes whose token is stale.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }
}
