//! # roomlinkd: room connectivity simulator
//!
//! Composition root that wires all adapters together and runs the
//! simulation.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Load the room layout and build the scene
//! - Construct the occlusion service, resolver, renderer, and behaviours
//! - Start the simulation once and tick it at the configured frame rate
//! - Stop on Ctrl-C or after the configured number of frames
//! - Write the final frame as JSON
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;
mod layout;

use std::io::Write;
use std::time::Duration;

use roomlink_adapter_render::{RenderSnapshot, SceneRenderer};
use roomlink_adapter_virtual::VirtualBehaviours;
use roomlink_app::event_bus::InProcessEventBus;
use roomlink_app::occlusion::OcclusionService;
use roomlink_app::resolver::ConnectionResolver;
use roomlink_app::simulation::SimulationController;
use roomlink_domain::device::Device;
use roomlink_domain::event::{Event, EventKind};
use roomlink_domain::status::StatusSummary;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::layout::Layout;

/// What gets written when the simulation ends.
#[derive(Serialize)]
struct Report<'a> {
    summary: &'a StatusSummary,
    render: RenderSnapshot,
    devices: &'a [Device],
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if let Some(path) = std::env::args().nth(1) {
        config.runner.layout = path.into();
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Layout & scene
    let layout = Layout::from_path(&config.runner.layout)?;
    let mut devices = layout.devices();
    let scene = layout.scene(&devices)?;
    tracing::info!(
        layout = %config.runner.layout.display(),
        devices = devices.len(),
        objects = scene.len(),
        "layout loaded"
    );

    // Event bus
    let event_bus = InProcessEventBus::new(256);
    tokio::spawn(log_events(event_bus.subscribe()));

    // Services
    let occlusion =
        OcclusionService::new(scene).with_attenuation(config.simulation.attenuation_per_wall)?;
    let resolver = ConnectionResolver::new(occlusion, config.resolver_config());
    let renderer = SceneRenderer::new(config.render_settings());
    let behaviours = config
        .runner
        .seed
        .map_or_else(VirtualBehaviours::default, VirtualBehaviours::with_seed);
    let mut controller = SimulationController::new(resolver, renderer, behaviours, event_bus);

    let summary = controller.start(&mut devices)?;
    tracing::info!(%summary, "connectivity resolved");

    // Frame loop
    let period = Duration::from_secs_f64(1.0 / f64::from(config.runner.fps));
    let mut ticker = tokio::time::interval(period);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut frames: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                controller.tick(period, &mut devices);
                frames += 1;
                if config.runner.frames != 0 && frames >= config.runner.frames {
                    break;
                }
            }
            result = &mut shutdown => {
                if let Err(err) = result {
                    tracing::warn!(%err, "failed to listen for ctrl-c");
                }
                tracing::info!(frames, "shutdown requested");
                break;
            }
        }
    }

    let report = Report {
        summary: controller.summary(),
        render: controller.renderer().snapshot(),
        devices: &devices,
    };
    write_report(&report, config.runner.snapshot.as_deref())?;

    controller.stop(&mut devices);
    Ok(())
}

fn write_report(
    report: &Report<'_>,
    path: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            serde_json::to_writer_pretty(file, report)?;
            tracing::info!(path = %path.display(), "snapshot written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, report)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

async fn log_events(mut events: broadcast::Receiver<Event>) {
    loop {
        match events.recv().await {
            Ok(event) => match event.kind {
                EventKind::DeviceOffline { device } => {
                    tracing::warn!(%device, "device has no controller in range");
                }
                kind => tracing::debug!(?kind, "simulation event"),
            },
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event log fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
