//! Occlusion service: signal strength between two points given the walls
//! a straight line between them crosses.

use roomlink_domain::error::ValidationError;
use roomlink_domain::geometry::{Point3, Ray};

use crate::ports::SceneGeometry;

/// Signal lost per wall crossed, as a fraction of full strength.
pub const DEFAULT_ATTENUATION_PER_WALL: f64 = 0.25;

/// Something that can estimate link quality between two points.
pub trait SignalProbe {
    /// Signal multiplier in `[0, 1]` between `start` and `end`.
    fn signal_strength(&self, start: Point3, end: Point3) -> f64;
}

impl<T: SignalProbe + ?Sized> SignalProbe for &T {
    fn signal_strength(&self, start: Point3, end: Point3) -> f64 {
        (**self).signal_strength(start, end)
    }
}

/// Counts occluders between two points and converts the count into a
/// signal multiplier: `max(0, 1 - walls * attenuation)`.
#[derive(Debug, Clone)]
pub struct OcclusionService<G> {
    scene: G,
    attenuation_per_wall: f64,
}

impl<G: SceneGeometry> OcclusionService<G> {
    /// Create a service with [`DEFAULT_ATTENUATION_PER_WALL`].
    pub fn new(scene: G) -> Self {
        Self {
            scene,
            attenuation_per_wall: DEFAULT_ATTENUATION_PER_WALL,
        }
    }

    /// Override the per-wall attenuation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] unless `attenuation` is within
    /// `0..=1`.
    pub fn with_attenuation(mut self, attenuation: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&attenuation) {
            return Err(ValidationError::OutOfRange {
                field: "attenuation_per_wall",
                min: 0.0,
                max: 1.0,
                value: attenuation,
            });
        }
        self.attenuation_per_wall = attenuation;
        Ok(self)
    }

    #[must_use]
    pub fn attenuation_per_wall(&self) -> f64 {
        self.attenuation_per_wall
    }

    #[must_use]
    pub fn scene(&self) -> &G {
        &self.scene
    }

    /// Number of walls a straight segment from `start` to `end` crosses.
    ///
    /// Objects that are not occluders (device meshes, furniture) are ignored.
    #[must_use]
    pub fn walls_between(&self, start: Point3, end: Point3) -> usize {
        let Some((ray, distance)) = Ray::between(start, end) else {
            return 0;
        };
        self.scene
            .raycast(&ray, distance)
            .iter()
            .filter(|hit| hit.occluder && hit.distance <= distance)
            .count()
    }
}

impl<G: SceneGeometry> SignalProbe for OcclusionService<G> {
    fn signal_strength(&self, start: Point3, end: Point3) -> f64 {
        let walls = self.walls_between(start, end);
        #[allow(clippy::cast_precision_loss)]
        let loss = walls as f64 * self.attenuation_per_wall;
        (1.0 - loss).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RayHit;
    use roomlink_domain::id::ObjectId;

    /// Reports `walls` occluders and one device mesh on every cast.
    struct FakeScene {
        walls: usize,
    }

    impl SceneGeometry for FakeScene {
        fn raycast(&self, _ray: &Ray, far: f64) -> Vec<RayHit> {
            let mut hits: Vec<RayHit> = (0..self.walls)
                .map(|i| {
                    let step = far / (self.walls + 2) as f64;
                    RayHit {
                        object: ObjectId::new(),
                        distance: step * (i + 1) as f64,
                        occluder: true,
                    }
                })
                .collect();
            hits.push(RayHit {
                object: ObjectId::new(),
                distance: 0.0,
                occluder: false,
            });
            hits
        }
    }

    fn service(walls: usize) -> OcclusionService<FakeScene> {
        OcclusionService::new(FakeScene { walls })
    }

    fn far_point() -> Point3 {
        Point3::new(10.0, 0.0, 0.0)
    }

    #[test]
    fn should_return_full_strength_for_zero_distance() {
        let p = Point3::new(2.0, 1.0, 2.0);
        assert!((service(3).signal_strength(p, p) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_ignore_non_occluding_hits() {
        let s = service(0).signal_strength(Point3::ORIGIN, far_point());
        assert!((s - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_lose_a_quarter_per_wall_by_default() {
        let s = service(1).signal_strength(Point3::ORIGIN, far_point());
        assert!((s - 0.75).abs() < 1e-12);
    }

    #[test]
    fn should_clamp_to_zero_when_walls_exceed_budget() {
        assert!(service(4).signal_strength(Point3::ORIGIN, far_point()).abs() < 1e-12);
        assert!(service(9).signal_strength(Point3::ORIGIN, far_point()).abs() < 1e-12);
    }

    #[test]
    fn should_never_increase_as_walls_are_added() {
        let mut previous = f64::INFINITY;
        for walls in 0..8 {
            let s = service(walls).signal_strength(Point3::ORIGIN, far_point());
            assert!(s <= previous);
            assert!((0.0..=1.0).contains(&s));
            previous = s;
        }
    }

    #[test]
    fn should_apply_configured_attenuation() {
        let svc = service(2).with_attenuation(0.3).unwrap();
        let s = svc.signal_strength(Point3::ORIGIN, far_point());
        assert!((s - 0.4).abs() < 1e-12);
    }

    #[test]
    fn should_reject_attenuation_outside_unit_interval() {
        assert!(service(0).with_attenuation(1.5).is_err());
        assert!(service(0).with_attenuation(-0.1).is_err());
    }
}
