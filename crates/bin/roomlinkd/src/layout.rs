//! Room layout files: the room shell, partition walls, and placed devices.
//!
//! ```json
//! {
//!   "room": { "width": 8.0, "length": 6.0 },
//!   "walls": [{ "start": [0.0, -3.0], "end": [0.0, 1.0] }],
//!   "devices": [{ "type": "hub", "position": { "x": 0, "y": 1, "z": 0 }, "capabilities": ["wifi"] }]
//! }
//! ```

use std::path::Path;

use roomlink_adapter_scene::{InMemoryScene, Room};
use roomlink_domain::device::{Device, PlacedDevice};
use roomlink_domain::error::RoomLinkError;
use serde::Deserialize;

/// A partition wall given by its floor segment.
#[derive(Debug, Clone, Deserialize)]
pub struct WallSpec {
    /// `[x, z]` of one end.
    pub start: [f64; 2],
    /// `[x, z]` of the other end.
    pub end: [f64; 2],
    /// Defaults to the room's wall thickness.
    #[serde(default)]
    pub thickness: Option<f64>,
    /// Defaults to the room height.
    #[serde(default)]
    pub height: Option<f64>,
}

/// A complete room layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub room: Room,
    #[serde(default)]
    pub walls: Vec<WallSpec>,
    #[serde(default)]
    pub devices: Vec<PlacedDevice>,
}

impl Layout {
    /// Read a layout from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a valid layout.
    pub fn from_path(path: &Path) -> Result<Self, LayoutError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a layout from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Parse`] when the JSON does not describe a layout.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Usable devices, in file order.
    ///
    /// Records lacking a type, a position, or capabilities are skipped with a
    /// warning.
    #[must_use]
    pub fn devices(&self) -> Vec<Device> {
        self.devices
            .iter()
            .cloned()
            .filter_map(|record| match Device::try_from(record) {
                Ok(device) => Some(device),
                Err(err) => {
                    tracing::warn!(%err, "ignoring placement record");
                    None
                }
            })
            .collect()
    }

    /// Build the scene: perimeter walls, partitions, and one mesh per device.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Geometry`] for an invalid room or wall.
    pub fn scene(&self, devices: &[Device]) -> Result<InMemoryScene, LayoutError> {
        let mut scene = InMemoryScene::with_room(&self.room)?;
        for wall in &self.walls {
            scene.add_partition(
                (wall.start[0], wall.start[1]),
                (wall.end[0], wall.end[1]),
                wall.thickness.unwrap_or(self.room.wall_thickness),
                wall.height.unwrap_or(self.room.height),
            )?;
        }
        for device in devices {
            scene.add_device_mesh(device)?;
        }
        tracing::debug!(
            objects = scene.len(),
            partitions = self.walls.len(),
            "scene built"
        );
        Ok(scene)
    }
}

/// Layout loading errors.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("failed to read layout file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse layout")]
    Parse(#[from] serde_json::Error),
    #[error("invalid room geometry")]
    Geometry(#[from] RoomLinkError),
}
