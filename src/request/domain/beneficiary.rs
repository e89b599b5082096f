//! Beneficiary record: the person the equipment is requested for.

use serde::{Deserialize, Serialize};

/// Person receiving the loaned equipment, distinct from the requester
/// account.
///
/// `last_name`, `first_name`, and `school` are mandatory at creation;
/// the creation rules in [`crate::request::validation`] enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    last_name: String,
    first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    registration_number: Option<String>,
    school: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference_person: Option<String>,
}

impl Beneficiary {
    /// Creates a beneficiary with the mandatory fields.
    #[must_use]
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        school: impl Into<String>,
    ) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            registration_number: None,
            school: school.into(),
            class_name: None,
            category: None,
            reference_person: None,
        }
    }

    /// Sets the national registration number.
    #[must_use]
    pub fn with_registration_number(mut self, value: impl Into<String>) -> Self {
        self.registration_number = Some(value.into());
        self
    }

    /// Sets the school class.
    #[must_use]
    pub fn with_class_name(mut self, value: impl Into<String>) -> Self {
        self.class_name = Some(value.into());
        self
    }

    /// Sets the support category.
    #[must_use]
    pub fn with_category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(value.into());
        self
    }

    /// Sets the reference person accompanying the beneficiary.
    #[must_use]
    pub fn with_reference_person(mut self, value: impl Into<String>) -> Self {
        self.reference_person = Some(value.into());
        self
    }

    /// Returns the beneficiary's last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the beneficiary's first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the national registration number, if recorded.
    #[must_use]
    pub fn registration_number(&self) -> Option<&str> {
        self.registration_number.as_deref()
    }

    /// Returns the school name.
    #[must_use]
    pub fn school(&self) -> &str {
        &self.school
    }

    /// Returns the school class, if recorded.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Returns the support category, if recorded.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the reference person, if recorded.
    #[must_use]
    pub fn reference_person(&self) -> Option<&str> {
        self.reference_person.as_deref()
    }
}

/// Optional contact details captured with a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

impl ContactDetails {
    /// Creates empty contact details.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phone: None,
            address: None,
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, value: impl Into<String>) -> Self {
        self.phone = Some(value.into());
        self
    }

    /// Sets the postal address.
    #[must_use]
    pub fn with_address(mut self, value: impl Into<String>) -> Self {
        self.address = Some(value.into());
        self
    }

    /// Returns the phone number, if recorded.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the postal address, if recorded.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

/// Pickup and return logistics, defaulted at creation when not supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logistics {
    pickup_location: String,
    loan_end: String,
}

impl Logistics {
    /// Creates logistics details.
    #[must_use]
    pub fn new(pickup_location: impl Into<String>, loan_end: impl Into<String>) -> Self {
        Self {
            pickup_location: pickup_location.into(),
            loan_end: loan_end.into(),
        }
    }

    /// Returns the pickup location description.
    #[must_use]
    pub fn pickup_location(&self) -> &str {
        &self.pickup_location
    }

    /// Returns the loan-end description.
    #[must_use]
    pub fn loan_end(&self) -> &str {
        &self.loan_end
    }
}

impl Default for Logistics {
    fn default() -> Self {
        Self::new("IT service desk", "End of the current school year")
    }
}
