//! Device kinds available for loan and their serial-tracking policy.

use super::ParseDeviceKindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of loaner device a request may cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// Tablet computer.
    Tablet,
    /// Laptop computer.
    Laptop,
    /// Stylus pen, treated as a fungible accessory.
    Stylus,
}

/// Device kinds whose physical units carry individually tracked serial
/// numbers. Adding a kind here is the only change needed to make the
/// engine demand a serial for it.
const SERIAL_TRACKED_KINDS: &[DeviceKind] = &[DeviceKind::Tablet, DeviceKind::Laptop];

impl DeviceKind {
    /// Every known device kind.
    pub const ALL: [Self; 3] = [Self::Tablet, Self::Laptop, Self::Stylus];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tablet => "tablet",
            Self::Laptop => "laptop",
            Self::Stylus => "stylus",
        }
    }

    /// Returns true when units of this kind have individually tracked
    /// serial identity.
    #[must_use]
    pub fn tracks_serial(self) -> bool {
        SERIAL_TRACKED_KINDS.contains(&self)
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DeviceKind {
    type Error = ParseDeviceKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "tablet" => Ok(Self::Tablet),
            "laptop" => Ok(Self::Laptop),
            "stylus" => Ok(Self::Stylus),
            _ => Err(ParseDeviceKindError(value.to_owned())),
        }
    }
}
