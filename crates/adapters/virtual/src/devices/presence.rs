//! Presence sensors: motion detectors and door/window contacts.

use rand::Rng;
use rand::rngs::StdRng;
use roomlink_app::ports::DeviceBehaviour;
use roomlink_domain::error::ValidationError;
use roomlink_domain::reading::Reading;

/// Chance that an idle motion sensor fires on a given update.
pub const MOTION_PROBABILITY: f64 = 0.005;

/// How long a triggered motion sensor stays triggered, in seconds.
pub const MOTION_HOLD_SECS: f64 = 2.0;

/// A motion sensor that fires at random and holds the detection briefly.
pub struct Motion {
    rng: StdRng,
    probability: f64,
    triggered_at: Option<f64>,
}

impl Motion {
    #[must_use]
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng,
            probability: MOTION_PROBABILITY,
            triggered_at: None,
        }
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] if `probability` is outside
    /// `[0, 1]` (NaN included).
    pub fn with_probability(rng: StdRng, probability: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ValidationError::OutOfRange {
                field: "motion probability",
                min: 0.0,
                max: 1.0,
                value: probability,
            });
        }
        Ok(Self {
            probability,
            ..Self::new(rng)
        })
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.triggered_at.is_some()
    }
}

impl DeviceBehaviour for Motion {
    fn update(&mut self, time: f64) -> Reading {
        match self.triggered_at {
            Some(at) if time - at >= MOTION_HOLD_SECS => self.triggered_at = None,
            Some(_) => {}
            None => {
                if self.rng.gen_bool(self.probability) {
                    self.triggered_at = Some(time);
                }
            }
        }
        Reading::new().with("motion", self.is_triggered())
    }

    fn stop(&mut self) {
        self.triggered_at = None;
    }
}

/// A door or window contact, open during the crest of a slow sine wave.
pub struct Opening;

impl DeviceBehaviour for Opening {
    fn update(&mut self, time: f64) -> Reading {
        let open = (time * 0.2).sin() > 0.8;
        Reading::new().with("state", if open { "Open" } else { "Closed" })
    }
}
