//! Oriented boxes and the ray/box slab test.

use roomlink_domain::error::GeometryError;
use roomlink_domain::geometry::{EPSILON, Point3, Ray, Vec3};

/// A box with arbitrary orientation: a centre, three orthonormal axes, and
/// the half-extent along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    center: Point3,
    axes: [Vec3; 3],
    half: [f64; 3],
}

impl OrientedBox {
    /// An axis-aligned box of the given full `size`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositiveExtent`] when a dimension is not
    /// strictly positive.
    pub fn axis_aligned(center: Point3, size: Vec3) -> Result<Self, GeometryError> {
        Ok(Self {
            center,
            axes: [Vec3::new(1.0, 0.0, 0.0), Vec3::UP, Vec3::new(0.0, 0.0, 1.0)],
            half: [
                positive("width", size.x)? / 2.0,
                positive("height", size.y)? / 2.0,
                positive("depth", size.z)? / 2.0,
            ],
        })
    }

    /// A wall standing on the floor along the segment `start`..`end`, given
    /// as `(x, z)` floor coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateWall`] when both ends coincide and
    /// [`GeometryError::NonPositiveExtent`] for a non-positive thickness or
    /// height.
    pub fn wall(
        start: (f64, f64),
        end: (f64, f64),
        thickness: f64,
        height: f64,
    ) -> Result<Self, GeometryError> {
        let thickness = positive("thickness", thickness)?;
        let height = positive("height", height)?;
        let run = Vec3::new(end.0 - start.0, 0.0, end.1 - start.1);
        let along = run.normalized().ok_or(GeometryError::DegenerateWall)?;
        let across = along.cross(Vec3::UP);
        let center = Point3::new(
            (start.0 + end.0) / 2.0,
            height / 2.0,
            (start.1 + end.1) / 2.0,
        );
        Ok(Self {
            center,
            axes: [along, Vec3::UP, across],
            half: [run.length() / 2.0, height / 2.0, thickness / 2.0],
        })
    }

    #[must_use]
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Whether `point` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: Point3) -> bool {
        let offset = point - self.center;
        self.axes
            .iter()
            .zip(self.half)
            .all(|(axis, half)| axis.dot(offset).abs() <= half + EPSILON)
    }

    /// Distance along `ray` at which it enters the box, if it does.
    ///
    /// A ray starting inside the box enters at distance zero.
    #[must_use]
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let offset = ray.origin - self.center;
        let mut near = f64::NEG_INFINITY;
        let mut far = f64::INFINITY;

        for (axis, half) in self.axes.iter().zip(self.half) {
            let origin = axis.dot(offset);
            let slope = axis.dot(ray.direction);
            if slope.abs() < EPSILON {
                // parallel to this slab
                if origin.abs() > half {
                    return None;
                }
                continue;
            }
            let mut t0 = (-half - origin) / slope;
            let mut t1 = (half - origin) / slope;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            near = near.max(t0);
            far = far.min(t1);
            if near > far {
                return None;
            }
        }

        (far >= 0.0).then(|| near.max(0.0))
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::NonPositiveExtent { field, value })
    }
}
