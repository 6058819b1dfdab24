//! Device behaviour port: simulated readings, independent of connectivity.

use roomlink_domain::device::Device;
use roomlink_domain::reading::Reading;

/// A running behaviour attached to one device.
pub trait DeviceBehaviour {
    /// Produce the current readings, `time` seconds after the simulation
    /// started.
    fn update(&mut self, time: f64) -> Reading;

    /// Called once when the simulation stops.
    fn stop(&mut self) {}

    /// Flip the power state, returning the new state, or `None` when the
    /// device has no on/off control.
    fn toggle(&mut self) -> Option<bool> {
        None
    }
}

/// What a factory may know about a device when creating its behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BehaviourContext {
    /// Number of devices attached to this one by a network link.
    pub clients: usize,
}

/// Creates behaviours for devices when a simulation starts.
pub trait BehaviourFactory {
    /// Behaviour for `device`, or `None` when it has no simulated readings.
    fn create(
        &mut self,
        device: &Device,
        context: BehaviourContext,
    ) -> Option<Box<dyn DeviceBehaviour>>;
}
