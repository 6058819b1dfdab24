//! Scene geometry port: enumerates what a ray passes through.

use std::sync::Arc;

use roomlink_domain::geometry::Ray;
use roomlink_domain::id::ObjectId;

/// One intersection between a ray and a scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub object: ObjectId,
    /// Distance from the ray origin to the entry point.
    pub distance: f64,
    /// Whether the object attenuates signals (a wall).
    pub occluder: bool,
}

/// Read access to the scene graph for ray casting.
pub trait SceneGeometry {
    /// All objects hit by `ray` within `far` metres, nearest first.
    ///
    /// Each object is reported at most once.
    fn raycast(&self, ray: &Ray, far: f64) -> Vec<RayHit>;
}

impl<T: SceneGeometry + ?Sized> SceneGeometry for &T {
    fn raycast(&self, ray: &Ray, far: f64) -> Vec<RayHit> {
        (**self).raycast(ray, far)
    }
}

impl<T: SceneGeometry + ?Sized> SceneGeometry for Arc<T> {
    fn raycast(&self, ray: &Ray, far: f64) -> Vec<RayHit> {
        (**self).raycast(ray, far)
    }
}
