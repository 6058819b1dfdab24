//! Connection results: the output of one resolution pass.
//!
//! Results are ephemeral: a fresh list is produced every time a simulation
//! starts. Endpoints carry positions so that renderers need no access to the
//! device list.

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::geometry::Point3;
use crate::id::DeviceId;
use crate::protocol::Protocol;
use crate::role::{Role, classify};

/// One resolved fact about the placed devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectionResult {
    /// `source` attaches to the network through `target` over `protocol`.
    Network {
        source: DeviceId,
        target: DeviceId,
        protocol: Protocol,
        from: Point3,
        to: Point3,
    },
    /// `source` (a trigger) plausibly drives `target` (an actuator).
    Logic {
        source: DeviceId,
        target: DeviceId,
        from: Point3,
        to: Point3,
    },
    /// `source` found no eligible controller.
    Offline { source: DeviceId, at: Point3 },
}

impl ConnectionResult {
    #[must_use]
    pub fn network(source: &Device, target: &Device, protocol: Protocol) -> Self {
        Self::Network {
            source: source.id,
            target: target.id,
            protocol,
            from: source.position,
            to: target.position,
        }
    }

    #[must_use]
    pub fn logic(trigger: &Device, actuator: &Device) -> Self {
        Self::Logic {
            source: trigger.id,
            target: actuator.id,
            from: trigger.position,
            to: actuator.position,
        }
    }

    #[must_use]
    pub fn offline(device: &Device) -> Self {
        Self::Offline {
            source: device.id,
            at: device.position,
        }
    }

    #[must_use]
    pub fn source(&self) -> DeviceId {
        match self {
            Self::Network { source, .. }
            | Self::Logic { source, .. }
            | Self::Offline { source, .. } => *source,
        }
    }

    #[must_use]
    pub fn target(&self) -> Option<DeviceId> {
        match self {
            Self::Network { target, .. } | Self::Logic { target, .. } => Some(*target),
            Self::Offline { .. } => None,
        }
    }

    /// Whether this result reports network status (online or offline).
    #[must_use]
    pub fn is_network_status(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Offline { .. })
    }
}

/// Write the outcome of a resolution pass back onto the device records.
///
/// Routers are always connected. Every other device is connected exactly
/// when it is the source of a network link.
pub fn apply_connectivity(devices: &mut [Device], results: &[ConnectionResult]) {
    for device in devices.iter_mut() {
        device.is_connected = classify(device) == Role::Router
            || results.iter().any(|r| {
                matches!(r, ConnectionResult::Network { source, .. } if *source == device.id)
            });
    }
}
