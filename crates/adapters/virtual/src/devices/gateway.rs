//! Infrastructure devices: hubs, routers, and cameras.

use roomlink_app::ports::DeviceBehaviour;
use roomlink_domain::reading::Reading;

/// A hub or router reporting how many devices attached to it.
pub struct Gateway {
    clients: usize,
}

impl Gateway {
    #[must_use]
    pub fn new(clients: usize) -> Self {
        Self { clients }
    }
}

impl DeviceBehaviour for Gateway {
    fn update(&mut self, _time: f64) -> Reading {
        let clients = i64::try_from(self.clients).unwrap_or(i64::MAX);
        Reading::new()
            .with("status", "Online")
            .with("devices", clients)
    }
}

/// A camera that records while the simulation runs.
pub struct Camera {
    fps: i64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { fps: 24 }
    }
}

impl DeviceBehaviour for Camera {
    fn update(&mut self, _time: f64) -> Reading {
        Reading::new().with("status", "REC").with("fps", self.fps)
    }
}
