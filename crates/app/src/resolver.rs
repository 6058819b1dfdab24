//! Connection resolver: decides how every placed device reaches the network.
//!
//! For each device, in strict priority order:
//!
//! 1. Routers are infrastructure: connected, no search.
//! 2. The device itself is never a candidate.
//! 3. **Bridge attempt**: for non-Wi-Fi capabilities, the nearest hub that
//!    serves one of them, within the bridge range and above the bridge signal
//!    threshold.
//! 4. **Wi-Fi attempt** (only if 3 found nothing): for Wi-Fi capable devices,
//!    the nearest router within the Wi-Fi range and above the (looser) Wi-Fi
//!    threshold.
//! 5. Otherwise the device is offline.
//!
//! "Nearest" means strictly closer than the best so far, so the first
//! candidate in input order wins ties.
//!
//! Automation links are inferred in a separate pass, see [`automation`].

pub mod automation;

use roomlink_domain::connection::ConnectionResult;
use roomlink_domain::device::Device;
use roomlink_domain::error::{RoomLinkError, ValidationError};
use roomlink_domain::protocol::Protocol;
use roomlink_domain::role::{Role, classify};

use crate::occlusion::SignalProbe;

/// Thresholds and ranges used by the resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverConfig {
    /// Minimum signal (exclusive) for a bridged link through a hub.
    pub bridge_min_signal: f64,
    /// Minimum signal (exclusive) for a direct Wi-Fi link to a router.
    pub wifi_min_signal: f64,
    /// Maximum distance (exclusive) to a hub, in metres.
    pub bridge_range_m: f64,
    /// Maximum distance (exclusive) to a router, in metres.
    pub wifi_range_m: f64,
    /// Maximum distance (exclusive) between a trigger and its actuator.
    pub logic_radius_m: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            bridge_min_signal: 0.2,
            wifi_min_signal: 0.1,
            bridge_range_m: 15.0,
            wifi_range_m: 30.0,
            logic_radius_m: 6.0,
        }
    }
}

impl ResolverConfig {
    /// Check that thresholds are fractions and ranges are positive.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("bridge_min_signal", self.bridge_min_signal),
            ("wifi_min_signal", self.wifi_min_signal),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::OutOfRange {
                    field,
                    min: 0.0,
                    max: 1.0,
                    value,
                });
            }
        }
        for (field, value) in [
            ("bridge_range_m", self.bridge_range_m),
            ("wifi_range_m", self.wifi_range_m),
            ("logic_radius_m", self.logic_radius_m),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ValidationError::NotPositive { field, value });
            }
        }
        Ok(())
    }
}

/// Limits applied while searching for the nearest controller.
#[derive(Debug, Clone, Copy)]
struct SearchLimits {
    min_signal: f64,
    max_range: f64,
}

/// Resolves network attachment and automation links for a set of devices.
#[derive(Debug, Clone)]
pub struct ConnectionResolver<P> {
    probe: P,
    config: ResolverConfig,
}

impl<P: SignalProbe> ConnectionResolver<P> {
    pub fn new(probe: P, config: ResolverConfig) -> Self {
        Self { probe, config }
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    #[must_use]
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Resolve every device against the given controllers.
    ///
    /// The result holds one network-status entry (network link or offline)
    /// per non-router device, in device order, followed by the automation
    /// links in trigger order. Deterministic for unchanged input.
    ///
    /// # Errors
    ///
    /// Returns [`RoomLinkError::InvalidDevice`] if any device or controller
    /// has a non-finite position. Nothing is resolved in that case.
    #[tracing::instrument(skip_all, fields(devices = devices.len(), controllers = controllers.len()))]
    pub fn resolve_all(
        &self,
        devices: &[Device],
        controllers: &[Device],
    ) -> Result<Vec<ConnectionResult>, RoomLinkError> {
        for device in devices.iter().chain(controllers) {
            device.check_resolvable()?;
        }

        let controllers: Vec<(&Device, Role)> =
            controllers.iter().map(|c| (c, classify(c))).collect();

        let mut results = Vec::with_capacity(devices.len());
        for device in devices {
            if classify(device) == Role::Router {
                continue;
            }
            match self.attach(device, &controllers) {
                Some(link) => results.push(link),
                None => {
                    tracing::debug!(device = %device.display_id(), "no eligible controller, offline");
                    results.push(ConnectionResult::offline(device));
                }
            }
        }

        results.extend(automation::infer_links(devices, self.config.logic_radius_m));
        Ok(results)
    }

    /// Network attachment for one non-router device.
    fn attach(&self, device: &Device, controllers: &[(&Device, Role)]) -> Option<ConnectionResult> {
        let own_id = device.id;
        let candidates = move || controllers.iter().filter(move |(c, _)| c.id != own_id);

        let bridged: Vec<&Protocol> = device.non_wifi_capabilities().collect();
        if !bridged.is_empty() {
            let hubs = candidates()
                .filter(|(c, role)| {
                    *role == Role::Hub && bridged.iter().any(|p| c.features.serves(p))
                })
                .map(|(c, _)| *c);
            let limits = SearchLimits {
                min_signal: self.config.bridge_min_signal,
                max_range: self.config.bridge_range_m,
            };
            if let Some(hub) = self.nearest(device, hubs, limits) {
                if let Some(protocol) = hub.features.first_served(bridged.iter().copied()) {
                    tracing::debug!(
                        device = %device.display_id(),
                        hub = %hub.display_id(),
                        %protocol,
                        "bridged through hub"
                    );
                    return Some(ConnectionResult::network(device, hub, protocol.clone()));
                }
            }
        }

        if device.speaks(&Protocol::Wifi) {
            let routers = candidates()
                .filter(|(_, role)| *role == Role::Router)
                .map(|(c, _)| *c);
            let limits = SearchLimits {
                min_signal: self.config.wifi_min_signal,
                max_range: self.config.wifi_range_m,
            };
            if let Some(router) = self.nearest(device, routers, limits) {
                tracing::debug!(
                    device = %device.display_id(),
                    router = %router.display_id(),
                    "direct wifi to router"
                );
                return Some(ConnectionResult::network(device, router, Protocol::Wifi));
            }
        }

        None
    }

    /// The closest candidate within range whose signal clears the threshold.
    ///
    /// Only a strictly smaller distance replaces the current best.
    fn nearest<'a>(
        &self,
        device: &Device,
        candidates: impl Iterator<Item = &'a Device>,
        limits: SearchLimits,
    ) -> Option<&'a Device> {
        let mut best = None;
        let mut best_distance = f64::INFINITY;
        for candidate in candidates {
            let distance = device.position.distance_to(candidate.position);
            if distance >= limits.max_range || distance >= best_distance {
                continue;
            }
            let signal = self
                .probe
                .signal_strength(device.position, candidate.position);
            if signal > limits.min_signal {
                best = Some(candidate);
                best_distance = distance;
            }
        }
        best
    }
}
