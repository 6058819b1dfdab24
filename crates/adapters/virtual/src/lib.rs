//! # roomlink-adapter-virtual
//!
//! Simulated device behaviours. Each placed device whose type or subtype is
//! recognised gets a behaviour that produces a fresh [`Reading`] on every
//! simulation tick. Behaviours never look at connectivity.
//!
//! ## Provided behaviours
//!
//! | Labels | Behaviour | Readings |
//! |--------|-----------|----------|
//! | `temperature`, `temp`, `thermostat` | [`Temperature`] | `temp`, `humidity`, `status`, `on` |
//! | `humidity` | [`Humidity`] | `humidity` |
//! | `pressure` | [`Pressure`] | `pressure`, `unit` |
//! | `air`, `co2` | [`AirQuality`] | `co2`, `aqi` |
//! | `motion` | [`Motion`] | `motion` |
//! | `door`, `window`, `opening` | [`Opening`] | `state` |
//! | `socket`, `plug` | [`Socket`] | `power`, `state` |
//! | `camera` | [`Camera`] | `status`, `fps` |
//! | `hub`, `router` | [`Gateway`] | `status`, `devices` |
//!
//! ## Dependency rule
//!
//! Depends on `roomlink-app` (port traits) and `roomlink-domain` only.
//!
//! [`Reading`]: roomlink_domain::reading::Reading

mod devices;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roomlink_app::ports::{BehaviourContext, BehaviourFactory, DeviceBehaviour};
use roomlink_domain::device::Device;

pub use devices::{
    AirQuality, Camera, Gateway, Humidity, Motion, Opening, Pressure, Socket, Temperature,
};

/// Creates simulated behaviours for placed devices.
///
/// Every behaviour draws from its own generator seeded from this factory, so a
/// seeded factory yields reproducible readings.
pub struct VirtualBehaviours {
    rng: StdRng,
}

impl Default for VirtualBehaviours {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl VirtualBehaviours {
    /// A factory whose behaviours are reproducible for a given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn child_rng(&mut self) -> StdRng {
        StdRng::seed_from_u64(self.rng.r#gen())
    }
}

impl BehaviourFactory for VirtualBehaviours {
    fn create(
        &mut self,
        device: &Device,
        context: BehaviourContext,
    ) -> Option<Box<dyn DeviceBehaviour>> {
        let label = device.label().to_ascii_lowercase();
        let behaviour: Box<dyn DeviceBehaviour> = match label.as_str() {
            "temperature" | "temp" | "thermostat" => {
                Box::new(Temperature::new(&mut self.child_rng()))
            }
            "humidity" => Box::new(Humidity),
            "pressure" => Box::new(Pressure),
            "air" | "co2" => Box::new(AirQuality::new(self.child_rng())),
            "motion" => Box::new(Motion::new(self.child_rng())),
            "door" | "window" | "opening" => Box::new(Opening),
            "socket" | "plug" => Box::new(Socket::new(self.child_rng())),
            "camera" => Box::new(Camera::default()),
            "hub" | "router" => Box::new(Gateway::new(context.clients)),
            other => {
                tracing::debug!(device = %device.display_id(), label = other, "no simulated behaviour");
                return None;
            }
        };
        Some(behaviour)
    }
}
