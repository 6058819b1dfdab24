//! # roomlink-adapter-render
//!
//! Turns connection results into visual artifacts.
//!
//! | Result | Artifact |
//! |--------|----------|
//! | network | dashed line styled by protocol |
//! | logic | green dashed line, lifted above network links |
//! | offline | red ring floating above the device |
//!
//! Nothing is diffed: callers [`clear`] and then [`draw`] the full list
//! again. [`animate`] only shifts dash offsets.
//!
//! ## Dependency rule
//!
//! Depends on `roomlink-app` (port traits) and `roomlink-domain` only.
//!
//! [`clear`]: roomlink_app::ports::LinkRenderer::clear
//! [`draw`]: roomlink_app::ports::LinkRenderer::draw
//! [`animate`]: roomlink_app::ports::LinkRenderer::animate

pub mod artifact;
pub mod style;

use roomlink_app::ports::LinkRenderer;
use roomlink_domain::connection::ConnectionResult;
use roomlink_domain::error::ValidationError;

pub use artifact::{Artifact, DashedLine, LineKind, RenderSnapshot, WarningMarker};
pub use style::{Color, LinkStyle};

/// Placement and animation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Height added to both ends of logic lines, in metres.
    pub logic_lift: f64,
    /// Height of offline markers above their device, in metres.
    pub marker_lift: f64,
    /// Dash offset change per frame.
    pub dash_step: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            logic_lift: 0.3,
            marker_lift: 0.35,
            dash_step: 0.005,
        }
    }
}

impl RenderSettings {
    /// # Errors
    ///
    /// Returns [`ValidationError::NotFinite`] for a non-finite setting.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("logic_lift", self.logic_lift),
            ("marker_lift", self.marker_lift),
            ("dash_step", self.dash_step),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NotFinite { field, value });
            }
        }
        Ok(())
    }
}

/// Keeps the drawn artifacts in memory, in draw order.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    settings: RenderSettings,
    artifacts: Vec<Artifact>,
    frame: u64,
}

impl SceneRenderer {
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            artifacts: Vec::new(),
            frame: 0,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn lines(&self) -> impl Iterator<Item = &DashedLine> {
        self.artifacts.iter().filter_map(Artifact::as_line)
    }

    pub fn markers(&self) -> impl Iterator<Item = &WarningMarker> {
        self.artifacts.iter().filter_map(Artifact::as_marker)
    }

    /// Frames animated since the last clear.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            frame: self.frame,
            artifacts: self.artifacts.clone(),
        }
    }

    fn artifact_for(&self, result: &ConnectionResult) -> Artifact {
        match result {
            ConnectionResult::Network {
                source,
                target,
                protocol,
                from,
                to,
            } => Artifact::Line(DashedLine {
                source: *source,
                target: *target,
                kind: LineKind::Network {
                    protocol: protocol.clone(),
                },
                from: *from,
                to: *to,
                style: LinkStyle::for_protocol(protocol),
                opacity: artifact::LINE_OPACITY,
                dash_offset: 0.0,
            }),
            ConnectionResult::Logic {
                source,
                target,
                from,
                to,
            } => Artifact::Line(DashedLine {
                source: *source,
                target: *target,
                kind: LineKind::Logic,
                from: from.lifted(self.settings.logic_lift),
                to: to.lifted(self.settings.logic_lift),
                style: LinkStyle::LOGIC,
                opacity: artifact::LINE_OPACITY,
                dash_offset: 0.0,
            }),
            ConnectionResult::Offline { source, at } => Artifact::Marker(WarningMarker::new(
                *source,
                at.lifted(self.settings.marker_lift),
            )),
        }
    }
}

impl LinkRenderer for SceneRenderer {
    fn clear(&mut self) {
        self.artifacts.clear();
        self.frame = 0;
    }

    fn draw(&mut self, results: &[ConnectionResult]) {
        let drawn: Vec<Artifact> = results.iter().map(|r| self.artifact_for(r)).collect();
        tracing::debug!(artifacts = drawn.len(), "drew connection results");
        self.artifacts.extend(drawn);
    }

    fn animate(&mut self) {
        self.frame += 1;
        for artifact in &mut self.artifacts {
            if let Artifact::Line(line) = artifact {
                line.dash_offset -= self.settings.dash_step;
            }
        }
    }
}
