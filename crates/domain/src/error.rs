//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`RoomLinkError`] via `#[from]`.

/// Top-level error shared by the domain and application layers.
#[derive(Debug, thiserror::Error)]
pub enum RoomLinkError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("invalid device")]
    InvalidDevice(#[from] InvalidDeviceError),

    #[error("geometry error")]
    Geometry(#[from] GeometryError),
}

/// A domain invariant was violated while building a value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("type must not be empty")]
    EmptyKind,

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

/// A device record is unusable for resolution.
///
/// Raised instead of silently treating missing data as zero, which would
/// produce wrong distances.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("device {id} is invalid: {reason}")]
pub struct InvalidDeviceError {
    pub id: String,
    pub reason: InvalidDeviceReason,
}

/// Why a device record was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidDeviceReason {
    #[error("missing position")]
    MissingPosition,

    #[error("missing capabilities")]
    MissingCapabilities,

    #[error("position is not finite")]
    NonFinitePosition,

    #[error("missing type")]
    MissingKind,
}

/// Degenerate geometry handed to the scene.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("wall segment has zero length")]
    DegenerateWall,

    #[error("{field} must be positive, got {value}")]
    NonPositiveExtent { field: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_roomlink_error() {
        let err: RoomLinkError = ValidationError::EmptyKind.into();
        assert!(matches!(err, RoomLinkError::Validation(ValidationError::EmptyKind)));
    }

    #[test]
    fn should_display_invalid_device_with_reason() {
        let err = InvalidDeviceError {
            id: "sensor-1".to_string(),
            reason: InvalidDeviceReason::MissingCapabilities,
        };
        assert_eq!(
            err.to_string(),
            "device sensor-1 is invalid: missing capabilities"
        );
    }

    #[test]
    fn should_display_out_of_range_bounds() {
        let err = ValidationError::OutOfRange {
            field: "threshold",
            min: 0.0,
            max: 1.0,
            value: 1.5,
        };
        assert_eq!(err.to_string(), "threshold must be within 0..=1, got 1.5");
    }

    #[test]
    fn should_convert_geometry_error_into_roomlink_error() {
        let err: RoomLinkError = GeometryError::DegenerateWall.into();
        assert!(matches!(err, RoomLinkError::Geometry(_)));
    }
}
