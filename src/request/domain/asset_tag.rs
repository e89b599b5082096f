//! Inventory asset-tag value type.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of decimal digits following the `H` prefix.
const TAG_DIGITS: usize = 5;

/// Error returned for values that do not follow the physical label scheme.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("asset tag '{0}' must be 'H' followed by five digits")]
pub struct ParseAssetTagError(pub String);

/// Physical inventory label in the fixed `H` + five digits scheme.
///
/// The empty value is accepted and means "no tag recorded yet"; it is
/// kept so an operator can blank a mistyped entry without deleting the
/// map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetTag(String);

impl AssetTag {
    /// Creates a validated asset tag.
    ///
    /// # Errors
    ///
    /// Returns [`ParseAssetTagError`] if the value is non-empty and does
    /// not match the label scheme.
    pub fn new(value: impl Into<String>) -> Result<Self, ParseAssetTagError> {
        let raw = value.into();
        if Self::is_well_formed(&raw) {
            Ok(Self(raw))
        } else {
            Err(ParseAssetTagError(raw))
        }
    }

    /// Returns true when `value` is empty or matches `H` followed by
    /// exactly five decimal digits. The check is device-kind independent.
    #[must_use]
    pub fn is_well_formed(value: &str) -> bool {
        if value.is_empty() {
            return true;
        }
        let mut chars = value.chars();
        if chars.next() != Some('H') {
            return false;
        }
        let digits = chars.as_str();
        digits.len() == TAG_DIGITS && digits.chars().all(|c| c.is_ascii_digit())
    }

    /// Returns the tag as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when no tag value has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for AssetTag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AssetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
