//! Fulfillment recorder: per-device identifiers supplied with a transition.

use super::{AssetTag, DeviceKind};
use std::collections::BTreeMap;

/// Per-device serial numbers and asset tags proposed alongside a status
/// transition.
///
/// The update is a pure merge source: supplied keys overwrite the stored
/// value for the same device, keys not supplied leave the stored value
/// untouched, and nothing is ever deleted. An operator performing an
/// unrelated update can therefore never lose an already recorded serial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FulfillmentUpdate {
    serials: BTreeMap<DeviceKind, String>,
    asset_tags: BTreeMap<DeviceKind, String>,
}

impl FulfillmentUpdate {
    /// Creates an empty update.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            serials: BTreeMap::new(),
            asset_tags: BTreeMap::new(),
        }
    }

    /// Proposes a serial number for a device kind.
    #[must_use]
    pub fn with_serial(mut self, device: DeviceKind, serial: impl Into<String>) -> Self {
        self.serials.insert(device, serial.into());
        self
    }

    /// Proposes an asset tag for a device kind. The value is validated by
    /// the lifecycle engine before it is merged.
    #[must_use]
    pub fn with_asset_tag(mut self, device: DeviceKind, tag: impl Into<String>) -> Self {
        self.asset_tags.insert(device, tag.into());
        self
    }

    /// Returns the proposed serial numbers.
    #[must_use]
    pub const fn serials(&self) -> &BTreeMap<DeviceKind, String> {
        &self.serials
    }

    /// Returns the proposed raw asset-tag values.
    #[must_use]
    pub const fn asset_tags(&self) -> &BTreeMap<DeviceKind, String> {
        &self.asset_tags
    }

    /// Returns true when the update proposes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.serials.is_empty() && self.asset_tags.is_empty()
    }

    /// Returns the serial a device would hold after this update is merged
    /// over `existing`: the proposed value when present, the stored value
    /// otherwise.
    #[must_use]
    pub fn merged_serial<'a>(
        &'a self,
        existing: &'a BTreeMap<DeviceKind, String>,
        device: DeviceKind,
    ) -> Option<&'a str> {
        self.serials
            .get(&device)
            .or_else(|| existing.get(&device))
            .map(String::as_str)
    }
}

/// Merges proposed serials over the stored map in place.
pub(crate) fn merge_serials(
    stored: &mut BTreeMap<DeviceKind, String>,
    proposed: &BTreeMap<DeviceKind, String>,
) {
    for (device, serial) in proposed {
        stored.insert(*device, serial.clone());
    }
}

/// Merges validated asset tags over the stored map in place.
pub(crate) fn merge_asset_tags(
    stored: &mut BTreeMap<DeviceKind, AssetTag>,
    proposed: &BTreeMap<DeviceKind, AssetTag>,
) {
    for (device, tag) in proposed {
        stored.insert(*device, tag.clone());
    }
}
