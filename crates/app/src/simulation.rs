//! Simulation lifecycle: stopped, running, stopped again.
//!
//! [`start`](SimulationController::start) runs exactly one resolution pass,
//! hands the results to the renderer, and attaches device behaviours.
//! [`tick`](SimulationController::tick) is called once per display frame and
//! only animates: it never re-resolves connectivity.
//! [`stop`](SimulationController::stop) tears everything down and is a no-op
//! when already stopped.
//!
//! All mutating operations take `&mut self`, so resolution passes can never
//! overlap even when the controller is shared behind a lock.

use std::time::Duration;

use roomlink_domain::connection::{ConnectionResult, apply_connectivity};
use roomlink_domain::device::Device;
use roomlink_domain::error::RoomLinkError;
use roomlink_domain::event::{Event, EventKind};
use roomlink_domain::id::DeviceId;
use roomlink_domain::role;
use roomlink_domain::status::StatusSummary;

use crate::occlusion::SignalProbe;
use crate::ports::{
    BehaviourContext, BehaviourFactory, DeviceBehaviour, EventPublisher, LinkRenderer,
};
use crate::resolver::ConnectionResolver;

/// Lifecycle state of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationState {
    #[default]
    Stopped,
    Running,
}

struct ActiveBehaviour {
    device: DeviceId,
    behaviour: Box<dyn DeviceBehaviour>,
}

/// Orchestrates resolution, rendering, and device behaviours.
pub struct SimulationController<P, R, F, E> {
    resolver: ConnectionResolver<P>,
    renderer: R,
    behaviours: F,
    publisher: E,
    state: SimulationState,
    active: Vec<ActiveBehaviour>,
    results: Vec<ConnectionResult>,
    summary: StatusSummary,
    elapsed: Duration,
}

impl<P, R, F, E> SimulationController<P, R, F, E>
where
    P: SignalProbe,
    R: LinkRenderer,
    F: BehaviourFactory,
    E: EventPublisher,
{
    pub fn new(resolver: ConnectionResolver<P>, renderer: R, behaviours: F, publisher: E) -> Self {
        Self {
            resolver,
            renderer,
            behaviours,
            publisher,
            state: SimulationState::Stopped,
            active: Vec::new(),
            results: Vec::new(),
            summary: StatusSummary::default(),
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn state(&self) -> SimulationState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    /// Results of the last resolution pass (empty when stopped).
    #[must_use]
    pub fn results(&self) -> &[ConnectionResult] {
        &self.results
    }

    /// Summary of the last resolution pass.
    #[must_use]
    pub fn summary(&self) -> &StatusSummary {
        &self.summary
    }

    /// Time simulated since the last start.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn resolver(&self) -> &ConnectionResolver<P> {
        &self.resolver
    }

    /// Resolve connectivity once and start animating.
    ///
    /// Calling this while running first performs a full [`stop`](Self::stop).
    /// Missing subtypes are repaired and `is_connected` is written back onto
    /// `devices`.
    ///
    /// # Errors
    ///
    /// Returns [`RoomLinkError::InvalidDevice`] when a device cannot be
    /// resolved. The controller stays stopped and nothing is drawn.
    #[tracing::instrument(skip_all, fields(devices = devices.len()))]
    pub fn start(&mut self, devices: &mut [Device]) -> Result<&StatusSummary, RoomLinkError> {
        if self.is_running() {
            self.stop(devices);
        }

        for device in devices.iter_mut() {
            role::repair(device);
        }
        let controllers = role::controllers(devices);
        let results = self.resolver.resolve_all(devices, &controllers)?;

        apply_connectivity(devices, &results);
        self.renderer.clear();
        self.renderer.draw(&results);

        for device in devices.iter() {
            let clients = results
                .iter()
                .filter(|r| {
                    matches!(r, ConnectionResult::Network { target, .. } if *target == device.id)
                })
                .count();
            if let Some(behaviour) = self
                .behaviours
                .create(device, BehaviourContext { clients })
            {
                self.active.push(ActiveBehaviour {
                    device: device.id,
                    behaviour,
                });
            }
        }

        self.summary = StatusSummary::summarize(devices, &results);
        tracing::info!(
            online = self.summary.online,
            offline = self.summary.offline,
            behaviours = self.active.len(),
            "simulation started"
        );

        for result in &results {
            if let ConnectionResult::Offline { source, .. } = result {
                self.emit(EventKind::DeviceOffline { device: *source });
            }
        }
        self.emit(EventKind::SimulationStarted {
            summary: self.summary.clone(),
        });

        self.results = results;
        self.elapsed = Duration::ZERO;
        self.state = SimulationState::Running;
        Ok(&self.summary)
    }

    /// Advance one display frame by `dt`.
    ///
    /// Animates the renderer and refreshes behaviour readings on `devices`.
    /// Does nothing while stopped.
    pub fn tick(&mut self, dt: Duration, devices: &mut [Device]) {
        if !self.is_running() {
            return;
        }
        self.elapsed += dt;
        self.renderer.animate();

        let time = self.elapsed.as_secs_f64();
        for active in &mut self.active {
            let reading = active.behaviour.update(time);
            if let Some(device) = devices.iter_mut().find(|d| d.id == active.device) {
                device.readings = reading;
            }
        }
    }

    /// Halt ticking, stop behaviours, and clear everything drawn.
    ///
    /// Idempotent: stopping a stopped simulation does nothing.
    #[tracing::instrument(skip_all)]
    pub fn stop(&mut self, devices: &mut [Device]) {
        if !self.is_running() {
            return;
        }
        for mut active in self.active.drain(..) {
            active.behaviour.stop();
            if let Some(device) = devices.iter_mut().find(|d| d.id == active.device) {
                device.readings.clear();
            }
        }
        self.renderer.clear();
        self.results.clear();
        self.state = SimulationState::Stopped;
        tracing::info!(elapsed = ?self.elapsed, "simulation stopped");
        self.emit(EventKind::SimulationStopped);
    }

    /// Flip the power state of a running device behaviour.
    ///
    /// Returns the new state, or `None` when the simulation is stopped, the
    /// device has no behaviour, or the behaviour has no on/off control.
    pub fn toggle(&mut self, device: DeviceId) -> Option<bool> {
        let on = self
            .active
            .iter_mut()
            .find(|a| a.device == device)?
            .behaviour
            .toggle()?;
        self.emit(EventKind::DeviceToggled { device, on });
        Some(on)
    }

    fn emit(&self, kind: EventKind) {
        if let Err(err) = self.publisher.publish(Event::new(kind)) {
            tracing::warn!(%err, "failed to publish simulation event");
        }
    }
}
