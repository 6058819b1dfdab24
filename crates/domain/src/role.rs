//! Device roles and the classifier that derives them.
//!
//! Placement data often lacks an explicit `subtype`: devices picked from the
//! `hub` bucket of the catalogue may be either protocol-bridging hubs or plain
//! Wi-Fi/Ethernet routers. [`classify`] infers the role deterministically from
//! capabilities; [`repair`] writes the inferred subtype back.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::Device;

/// Placement bucket shared by hubs and routers.
pub const HUB_BUCKET: &str = "hub";
/// Subtype marking a router (Wi-Fi / Ethernet uplink).
pub const ROUTER_SUBTYPE: &str = "router";
/// Subtype marking a hub (protocol bridge).
pub const HUB_SUBTYPE: &str = "hub";

/// The network role of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Uplink root. Always connected, never a client.
    Router,
    /// Bridges non-Wi-Fi protocols listed in `serves_protocols`.
    Hub,
    /// Anything else: sensors, actuators, plugs, cameras.
    PlainDevice,
}

impl Role {
    /// Whether devices may attach to this role.
    #[must_use]
    pub fn is_controller(self) -> bool {
        matches!(self, Self::Router | Self::Hub)
    }

    fn of_subtype(subtype: &str) -> Self {
        if subtype.eq_ignore_ascii_case(ROUTER_SUBTYPE) {
            Self::Router
        } else if subtype.eq_ignore_ascii_case(HUB_SUBTYPE) {
            Self::Hub
        } else {
            Self::PlainDevice
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Router => f.write_str("router"),
            Self::Hub => f.write_str("hub"),
            Self::PlainDevice => f.write_str("device"),
        }
    }
}

/// Subtype the device has, or the one it would be repaired to.
fn effective_subtype(device: &Device) -> Cow<'_, str> {
    if let Some(subtype) = device.subtype.as_deref() {
        return Cow::Borrowed(subtype);
    }
    if device.kind.eq_ignore_ascii_case(HUB_BUCKET) {
        if device.capabilities.iter().any(|p| p.is_hub_radio()) {
            Cow::Borrowed(HUB_SUBTYPE)
        } else {
            Cow::Borrowed(ROUTER_SUBTYPE)
        }
    } else {
        Cow::Borrowed(device.kind.as_str())
    }
}

/// Resolve the role of `device` without mutating it.
///
/// An explicit `subtype` wins. Otherwise devices in the `hub` bucket become
/// hubs when they speak a bridged radio (zigbee, matter, sub1g, bluetooth)
/// and routers when they do not; every other device's subtype is its type.
#[must_use]
pub fn classify(device: &Device) -> Role {
    Role::of_subtype(&effective_subtype(device))
}

/// Fill in a missing `subtype` and return the resulting role.
///
/// Idempotent: a second call sees the repaired subtype and returns the same
/// role.
pub fn repair(device: &mut Device) -> Role {
    if device.subtype.is_none() {
        let inferred = effective_subtype(device).into_owned();
        device.subtype = Some(inferred);
    }
    classify(device)
}

/// Devices that other devices may attach to (hubs and routers), in input
/// order.
#[must_use]
pub fn controllers(devices: &[Device]) -> Vec<Device> {
    devices
        .iter()
        .filter(|d| classify(d).is_controller())
        .cloned()
        .collect()
}
