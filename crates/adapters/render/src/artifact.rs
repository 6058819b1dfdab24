//! Visual artifacts produced from connection results.

use serde::Serialize;

use roomlink_domain::geometry::Point3;
use roomlink_domain::id::DeviceId;
use roomlink_domain::protocol::Protocol;

use crate::style::{Color, LinkStyle};

/// Opacity of every dashed line.
pub const LINE_OPACITY: f64 = 0.8;

/// Opacity of offline markers.
pub const MARKER_OPACITY: f64 = 0.7;

pub const MARKER_INNER_RADIUS: f64 = 0.18;
pub const MARKER_OUTER_RADIUS: f64 = 0.22;

/// What a dashed line stands for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineKind {
    Network { protocol: Protocol },
    Logic,
}

/// An animated dashed line between two devices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashedLine {
    pub source: DeviceId,
    pub target: DeviceId,
    pub kind: LineKind,
    pub from: Point3,
    pub to: Point3,
    pub style: LinkStyle,
    pub opacity: f64,
    /// Advances every frame so the dashes appear to flow.
    pub dash_offset: f64,
}

impl DashedLine {
    #[must_use]
    pub fn length(&self) -> f64 {
        self.from.distance_to(self.to)
    }
}

/// A ring floating above a device that found no controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarningMarker {
    pub device: DeviceId,
    pub center: Point3,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub color: Color,
    pub opacity: f64,
}

impl WarningMarker {
    #[must_use]
    pub fn new(device: DeviceId, center: Point3) -> Self {
        Self {
            device,
            center,
            inner_radius: MARKER_INNER_RADIUS,
            outer_radius: MARKER_OUTER_RADIUS,
            color: Color::OFFLINE,
            opacity: MARKER_OPACITY,
        }
    }
}

/// Anything the renderer has drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "artifact", rename_all = "snake_case")]
pub enum Artifact {
    Line(DashedLine),
    Marker(WarningMarker),
}

impl Artifact {
    #[must_use]
    pub fn as_line(&self) -> Option<&DashedLine> {
        match self {
            Self::Line(line) => Some(line),
            Self::Marker(_) => None,
        }
    }

    #[must_use]
    pub fn as_marker(&self) -> Option<&WarningMarker> {
        match self {
            Self::Marker(marker) => Some(marker),
            Self::Line(_) => None,
        }
    }
}

/// Everything drawn at one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub frame: u64,
    pub artifacts: Vec<Artifact>,
}
