//! Device: a placed smart-home device in the room.
//!
//! Devices arrive from the placement subsystem (see [`placement`]) and are
//! read by the resolver. Only two fields change during a simulation run:
//! [`Device::is_connected`] and [`Device::readings`].

mod features;
pub mod placement;

pub use features::Features;
pub use placement::PlacedDevice;

use serde::{Deserialize, Serialize};

use crate::error::{
    InvalidDeviceError, InvalidDeviceReason, RoomLinkError, ValidationError,
};
use crate::geometry::{Point3, Vec3};
use crate::id::DeviceId;
use crate::protocol::Protocol;
use crate::reading::Reading;

/// A placed device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub position: Point3,
    /// Euler angles in radians.
    #[serde(default)]
    pub rotation: Vec3,
    /// Coarse placement bucket (`temperature`, `motion`, `hub`, …).
    #[serde(rename = "type")]
    pub kind: String,
    /// Fine-grained role (`router`, `hub`, `temp`, …). Repaired by the
    /// classifier when absent.
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<Protocol>,
    #[serde(default)]
    pub features: Features,
    #[serde(default)]
    pub is_connected: bool,
    #[serde(default, skip_serializing_if = "Reading::is_empty")]
    pub readings: Reading,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// The label used for trigger/actuator matching: `subtype`, falling back
    /// to `type`.
    #[must_use]
    pub fn label(&self) -> &str {
        self.subtype.as_deref().unwrap_or(&self.kind)
    }

    /// Whether the device declares `protocol` among its capabilities.
    #[must_use]
    pub fn speaks(&self, protocol: &Protocol) -> bool {
        self.capabilities.contains(protocol)
    }

    /// Capabilities other than Wi-Fi, in declaration order.
    pub fn non_wifi_capabilities(&self) -> impl Iterator<Item = &Protocol> {
        self.capabilities.iter().filter(|p| **p != Protocol::Wifi)
    }

    /// Check that the record can take part in distance computations.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDeviceError`] when the position is not finite.
    pub fn check_resolvable(&self) -> Result<(), InvalidDeviceError> {
        if self.position.is_finite() {
            Ok(())
        } else {
            Err(InvalidDeviceError {
                id: self.display_id(),
                reason: InvalidDeviceReason::NonFinitePosition,
            })
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RoomLinkError::Validation`] when `type` is empty or the
    /// position is not finite.
    pub fn validate(&self) -> Result<(), RoomLinkError> {
        if self.kind.trim().is_empty() {
            return Err(ValidationError::EmptyKind.into());
        }
        for (field, value) in [
            ("position.x", self.position.x),
            ("position.y", self.position.y),
            ("position.z", self.position.z),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NotFinite { field, value }.into());
            }
        }
        Ok(())
    }

    /// Name when present, id otherwise. Used in logs and errors.
    #[must_use]
    pub fn display_id(&self) -> String {
        if self.name.is_empty() {
            self.id.to_string()
        } else {
            self.name.clone()
        }
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    position: Point3,
    rotation: Vec3,
    kind: Option<String>,
    subtype: Option<String>,
    capabilities: Vec<Protocol>,
    features: Features,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn position(mut self, position: Point3) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn at(self, x: f64, y: f64, z: f64) -> Self {
        self.position(Point3::new(x, y, z))
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    #[must_use]
    pub fn capability(mut self, protocol: impl Into<Protocol>) -> Self {
        self.capabilities.push(protocol.into());
        self
    }

    #[must_use]
    pub fn capabilities<I, P>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Protocol>,
    {
        self.capabilities.extend(protocols.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`RoomLinkError::Validation`] if `type` is missing or the
    /// position is not finite.
    pub fn build(self) -> Result<Device, RoomLinkError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            position: self.position,
            rotation: self.rotation,
            kind: self.kind.unwrap_or_default(),
            subtype: self.subtype,
            capabilities: self.capabilities,
            features: self.features,
            is_connected: false,
            readings: Reading::default(),
        };
        device.validate()?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_device_when_type_provided() {
        let device = Device::builder()
            .name("Kitchen motion")
            .kind("motion")
            .capability("zigbee")
            .at(1.0, 2.0, 3.0)
            .build()
            .unwrap();

        assert_eq!(device.kind, "motion");
        assert_eq!(device.position, Point3::new(1.0, 2.0, 3.0));
        assert!(!device.is_connected);
        assert!(device.speaks(&Protocol::Zigbee));
    }

    #[test]
    fn should_return_validation_error_when_type_is_missing() {
        let result = Device::builder().build();
        assert!(matches!(
            result,
            Err(RoomLinkError::Validation(ValidationError::EmptyKind))
        ));
    }

    #[test]
    fn should_return_validation_error_when_position_is_nan() {
        let result = Device::builder().kind("light").at(f64::NAN, 0.0, 0.0).build();
        assert!(matches!(
            result,
            Err(RoomLinkError::Validation(ValidationError::NotFinite { field: "position.x", .. }))
        ));
    }

    #[test]
    fn should_prefer_subtype_for_label() {
        let device = Device::builder()
            .kind("hub")
            .subtype("router")
            .build()
            .unwrap();
        assert_eq!(device.label(), "router");

        let plain = Device::builder().kind("door").build().unwrap();
        assert_eq!(plain.label(), "door");
    }

    #[test]
    fn should_list_non_wifi_capabilities_in_declaration_order() {
        let device = Device::builder()
            .kind("plug")
            .capabilities(["matter", "wifi", "zigbee"])
            .build()
            .unwrap();
        let caps: Vec<_> = device.non_wifi_capabilities().cloned().collect();
        assert_eq!(caps, vec![Protocol::Matter, Protocol::Zigbee]);
    }

    #[test]
    fn should_reject_non_finite_position_for_resolution() {
        let mut device = Device::builder().kind("light").build().unwrap();
        device.position.z = f64::INFINITY;
        let err = device.check_resolvable().unwrap_err();
        assert_eq!(err.reason, InvalidDeviceReason::NonFinitePosition);
    }

    #[test]
    fn should_read_type_field_from_json() {
        let json = r#"{
            "id": "6f1c4f5e-2d7a-4a5e-9a0b-1f2e3d4c5b6a",
            "name": "Router",
            "position": {"x": 0.0, "y": 1.0, "z": 0.0},
            "type": "hub",
            "subtype": "router",
            "capabilities": ["wifi", "ethernet"]
        }"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.kind, "hub");
        assert_eq!(device.subtype.as_deref(), Some("router"));
        assert_eq!(device.capabilities, vec![Protocol::Wifi, Protocol::Ethernet]);
        assert!(device.features.serves_protocols.is_none());
    }
}
