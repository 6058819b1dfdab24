//! Room shell: floor dimensions and the four perimeter walls.

use serde::{Deserialize, Serialize};

use roomlink_domain::error::{GeometryError, RoomLinkError};

use crate::shape::OrientedBox;

/// Dimensions of a rectangular room centred on the origin.
///
/// `width` runs along x, `length` along z. Perimeter walls are built inside
/// the outer footprint, `wall_thickness` deep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Room {
    pub width: f64,
    pub length: f64,
    pub height: f64,
    pub wall_thickness: f64,
}

impl Default for Room {
    fn default() -> Self {
        Self {
            width: 8.0,
            length: 6.0,
            height: 3.0,
            wall_thickness: 0.2,
        }
    }
}

impl Room {
    /// Create a builder for a [`Room`].
    #[must_use]
    pub fn builder() -> RoomBuilder {
        RoomBuilder::default()
    }

    /// Validate the room dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositiveExtent`] when a dimension is not
    /// strictly positive, or when the walls are thicker than half the room.
    pub fn validate(&self) -> Result<(), RoomLinkError> {
        for (field, value) in [
            ("width", self.width),
            ("length", self.length),
            ("height", self.height),
            ("wall_thickness", self.wall_thickness),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeometryError::NonPositiveExtent { field, value }.into());
            }
        }
        let inner = self.width.min(self.length) - 2.0 * self.wall_thickness;
        if inner <= 0.0 {
            return Err(GeometryError::NonPositiveExtent {
                field: "inner width",
                value: inner,
            }
            .into());
        }
        Ok(())
    }

    /// The four perimeter walls: north, south, west, east.
    ///
    /// North and south span the full width; west and east fit between them so
    /// corners are not covered twice.
    ///
    /// # Errors
    ///
    /// Returns an error when the dimensions are invalid.
    pub fn perimeter(&self) -> Result<[OrientedBox; 4], RoomLinkError> {
        self.validate()?;
        let hw = self.width / 2.0;
        let hl = self.length / 2.0;
        let t = self.wall_thickness;
        let mid = t / 2.0;

        Ok([
            OrientedBox::wall((-hw, -hl + mid), (hw, -hl + mid), t, self.height)?,
            OrientedBox::wall((-hw, hl - mid), (hw, hl - mid), t, self.height)?,
            OrientedBox::wall((-hw + mid, -hl + t), (-hw + mid, hl - t), t, self.height)?,
            OrientedBox::wall((hw - mid, -hl + t), (hw - mid, hl - t), t, self.height)?,
        ])
    }
}

/// Builder for [`Room`].
#[derive(Debug, Default)]
pub struct RoomBuilder {
    room: Room,
}

impl RoomBuilder {
    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.room.width = width;
        self
    }

    #[must_use]
    pub fn length(mut self, length: f64) -> Self {
        self.room.length = length;
        self
    }

    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.room.height = height;
        self
    }

    #[must_use]
    pub fn wall_thickness(mut self, thickness: f64) -> Self {
        self.room.wall_thickness = thickness;
        self
    }

    /// Build the room.
    ///
    /// # Errors
    ///
    /// Returns an error when a dimension is not strictly positive.
    pub fn build(self) -> Result<Room, RoomLinkError> {
        self.room.validate()?;
        Ok(self.room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomlink_domain::geometry::Point3;

    #[test]
    fn should_default_to_eight_by_six_room() {
        let room = Room::builder().build().unwrap();
        assert!((room.width - 8.0).abs() < f64::EPSILON);
        assert!((room.length - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_reject_zero_height() {
        let err = Room::builder().height(0.0).build().unwrap_err();
        assert!(matches!(
            err,
            RoomLinkError::Geometry(GeometryError::NonPositiveExtent {
                field: "height",
                ..
            })
        ));
    }

    #[test]
    fn should_reject_walls_thicker_than_the_room() {
        assert!(
            Room::builder()
                .width(1.0)
                .wall_thickness(0.5)
                .build()
                .is_err()
        );
    }

    #[test]
    fn should_place_perimeter_walls_inside_the_footprint() {
        let room = Room::builder().width(10.0).length(4.0).build().unwrap();
        let [north, south, west, east] = room.perimeter().unwrap();
        assert!(north.contains(Point3::new(0.0, 1.0, -1.95)));
        assert!(south.contains(Point3::new(4.9, 1.0, 1.95)));
        assert!(west.contains(Point3::new(-4.95, 1.0, 0.0)));
        assert!(east.contains(Point3::new(4.95, 1.0, 0.0)));
        assert!(!north.contains(Point3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn should_deserialize_partial_room_with_defaults() {
        let room: Room = serde_json::from_str(r#"{"width": 12.0}"#).unwrap();
        assert!((room.width - 12.0).abs() < f64::EPSILON);
        assert!((room.height - 3.0).abs() < f64::EPSILON);
    }
}
