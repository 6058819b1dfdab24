//! # roomlink-adapter-scene
//!
//! In-memory scene graph used for occlusion queries.
//!
//! The scene holds oriented boxes: the four perimeter walls of the room,
//! interior partition walls, device meshes, and any other named object. Ray
//! casts report every box they enter; the occlusion service counts the ones
//! flagged as walls.
//!
//! ## Dependency rule
//!
//! Depends on `roomlink-app` (port traits) and `roomlink-domain` only.

pub mod room;
pub mod shape;

use roomlink_app::ports::{RayHit, SceneGeometry};
use roomlink_domain::device::Device;
use roomlink_domain::error::RoomLinkError;
use roomlink_domain::geometry::{Ray, Vec3};
use roomlink_domain::id::ObjectId;

pub use room::{Room, RoomBuilder};
pub use shape::OrientedBox;

/// Name that marks an object as a wall regardless of its flag.
pub const WALL_NAME: &str = "wall";

/// Edge length of the cube registered for each device mesh, in metres.
pub const DEVICE_MESH_SIZE: f64 = 0.2;

/// What a scene object represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Wall,
    DeviceMesh,
    Furniture,
}

/// One object in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
    pub is_wall: bool,
    pub bounds: OrientedBox,
}

impl SceneObject {
    /// Whether this object attenuates signals.
    ///
    /// Objects count when flagged `is_wall` or named [`WALL_NAME`]. Device
    /// meshes never count, whatever their name.
    #[must_use]
    pub fn is_occluder(&self) -> bool {
        self.kind != ObjectKind::DeviceMesh && (self.is_wall || self.name == WALL_NAME)
    }
}

/// Scene graph kept entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryScene {
    objects: Vec<SceneObject>,
}

impl InMemoryScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene holding the room's four perimeter walls.
    ///
    /// # Errors
    ///
    /// Returns an error when the room dimensions are invalid.
    pub fn with_room(room: &Room) -> Result<Self, RoomLinkError> {
        let mut scene = Self::new();
        for bounds in room.perimeter()? {
            scene.insert(WALL_NAME, ObjectKind::Wall, true, bounds);
        }
        Ok(scene)
    }

    /// Add an interior wall standing on the floor along `start`..`end`,
    /// given as `(x, z)` floor coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error when the segment is degenerate or the thickness or
    /// height is not strictly positive.
    pub fn add_partition(
        &mut self,
        start: (f64, f64),
        end: (f64, f64),
        thickness: f64,
        height: f64,
    ) -> Result<ObjectId, RoomLinkError> {
        let bounds = OrientedBox::wall(start, end, thickness, height)?;
        tracing::debug!(?start, ?end, "added partition wall");
        Ok(self.insert(WALL_NAME, ObjectKind::Wall, true, bounds))
    }

    /// Register a small non-occluding cube at the device's position.
    ///
    /// # Errors
    ///
    /// Returns an error when the device position is not finite.
    pub fn add_device_mesh(&mut self, device: &Device) -> Result<ObjectId, RoomLinkError> {
        device.check_resolvable()?;
        let size = Vec3::new(DEVICE_MESH_SIZE, DEVICE_MESH_SIZE, DEVICE_MESH_SIZE);
        let bounds = OrientedBox::axis_aligned(device.position, size)?;
        Ok(self.insert(&device.name, ObjectKind::DeviceMesh, false, bounds))
    }

    /// Add an arbitrary named object, e.g. furniture.
    ///
    /// It occludes when `is_wall` is set or its name is [`WALL_NAME`].
    pub fn add_object(
        &mut self,
        name: impl Into<String>,
        is_wall: bool,
        bounds: OrientedBox,
    ) -> ObjectId {
        self.insert(name, ObjectKind::Furniture, is_wall, bounds)
    }

    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Objects that attenuate signals.
    pub fn occluders(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| o.is_occluder())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn insert(
        &mut self,
        name: impl Into<String>,
        kind: ObjectKind,
        is_wall: bool,
        bounds: OrientedBox,
    ) -> ObjectId {
        let id = ObjectId::new();
        self.objects.push(SceneObject {
            id,
            name: name.into(),
            kind,
            is_wall,
            bounds,
        });
        id
    }
}

impl SceneGeometry for InMemoryScene {
    fn raycast(&self, ray: &Ray, far: f64) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = self
            .objects
            .iter()
            .filter_map(|object| {
                let distance = object.bounds.intersect(ray)?;
                (distance <= far).then(|| RayHit {
                    object: object.id,
                    distance,
                    occluder: object.is_occluder(),
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
