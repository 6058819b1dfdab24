//! Placement records as handed over by the placement subsystem or a loaded
//! project.
//!
//! Everything is optional on the wire. Conversion into a [`Device`] rejects
//! records without a position, capabilities, or type instead of guessing.

use serde::{Deserialize, Serialize};

use super::{Device, Features};
use crate::error::{InvalidDeviceError, InvalidDeviceReason};
use crate::geometry::{Point3, Vec3};
use crate::id::DeviceId;
use crate::protocol::Protocol;
use crate::reading::Reading;

/// A device record before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacedDevice {
    #[serde(default)]
    pub id: Option<DeviceId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<Point3>,
    #[serde(default)]
    pub rotation: Option<Vec3>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub capabilities: Option<Vec<Protocol>>,
    #[serde(default)]
    pub features: Option<Features>,
}

impl TryFrom<PlacedDevice> for Device {
    type Error = InvalidDeviceError;

    fn try_from(record: PlacedDevice) -> Result<Self, Self::Error> {
        let id = record.id.unwrap_or_default();
        let name = record.name.unwrap_or_default();
        let reject = |reason| InvalidDeviceError {
            id: if name.is_empty() {
                id.to_string()
            } else {
                name.clone()
            },
            reason,
        };

        let kind = record
            .kind
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| reject(InvalidDeviceReason::MissingKind))?;
        let position = record
            .position
            .ok_or_else(|| reject(InvalidDeviceReason::MissingPosition))?;
        if !position.is_finite() {
            return Err(reject(InvalidDeviceReason::NonFinitePosition));
        }
        let capabilities = record
            .capabilities
            .ok_or_else(|| reject(InvalidDeviceReason::MissingCapabilities))?;

        Ok(Device {
            id,
            name,
            position,
            rotation: record.rotation.unwrap_or_default(),
            kind,
            subtype: record.subtype.filter(|s| !s.trim().is_empty()),
            capabilities,
            features: record.features.unwrap_or_default(),
            is_connected: false,
            readings: Reading::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PlacedDevice {
        PlacedDevice {
            name: Some("Hall light".to_string()),
            position: Some(Point3::new(1.0, 2.5, 1.0)),
            kind: Some("light".to_string()),
            capabilities: Some(vec![Protocol::Zigbee]),
            ..PlacedDevice::default()
        }
    }

    #[test]
    fn should_convert_complete_record() {
        let device = Device::try_from(record()).unwrap();
        assert_eq!(device.name, "Hall light");
        assert_eq!(device.capabilities, vec![Protocol::Zigbee]);
        assert!(device.subtype.is_none());
    }

    #[test]
    fn should_reject_record_without_position() {
        let err = Device::try_from(PlacedDevice {
            position: None,
            ..record()
        })
        .unwrap_err();
        assert_eq!(err.reason, InvalidDeviceReason::MissingPosition);
        assert_eq!(err.id, "Hall light");
    }

    #[test]
    fn should_reject_record_without_capabilities() {
        let err = Device::try_from(PlacedDevice {
            capabilities: None,
            ..record()
        })
        .unwrap_err();
        assert_eq!(err.reason, InvalidDeviceReason::MissingCapabilities);
    }

    #[test]
    fn should_accept_empty_capability_list() {
        let device = Device::try_from(PlacedDevice {
            capabilities: Some(Vec::new()),
            ..record()
        })
        .unwrap();
        assert!(device.capabilities.is_empty());
    }

    #[test]
    fn should_drop_blank_subtype() {
        let device = Device::try_from(PlacedDevice {
            subtype: Some("  ".to_string()),
            ..record()
        })
        .unwrap();
        assert!(device.subtype.is_none());
    }
}
