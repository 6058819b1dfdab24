//! Smart socket with a fluctuating power draw.

use rand::Rng;
use rand::rngs::StdRng;
use roomlink_app::ports::DeviceBehaviour;
use roomlink_domain::reading::Reading;

use super::tenths;

/// Reports a random power draw between 0 and 100 W.
pub struct Socket {
    rng: StdRng,
}

impl Socket {
    #[must_use]
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl DeviceBehaviour for Socket {
    fn update(&mut self, _time: f64) -> Reading {
        let power = tenths(self.rng.gen_range(0.0..100.0));
        Reading::new().with("power", power).with("state", "ON")
    }
}
