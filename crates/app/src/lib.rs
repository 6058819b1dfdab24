//! # roomlink-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `SceneGeometry`: ray casts against the scene graph
//!   - `LinkRenderer`: draws connection results and animates them
//!   - `BehaviourFactory` / `DeviceBehaviour`: simulated device readings
//!   - `EventPublisher`: simulation events
//! - Provide the **occlusion service** (wall counting → signal strength)
//! - Provide the **connection resolver** (network attachment + automation links)
//! - Provide the **simulation controller** (start / tick / stop state machine)
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `roomlink-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod occlusion;
pub mod ports;
pub mod resolver;
pub mod simulation;
