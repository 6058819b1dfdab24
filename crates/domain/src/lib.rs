//! # roomlink-domain
//!
//! Pure domain model for the roomlink connectivity simulator.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **geometry primitives** (points, vectors, rays) shared by the scene and the resolver
//! - Define **Protocols** (wifi, zigbee, matter, …) and **Devices** (placed things with capabilities)
//! - Define **Roles** and the classifier that repairs missing role data
//! - Define **Connection results** (network, logic, offline) and the **status summary**
//! - Define **Readings** produced by simulated device behaviours
//! - Define **Events** emitted while a simulation runs
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod connection;
pub mod device;
pub mod event;
pub mod geometry;
pub mod protocol;
pub mod reading;
pub mod role;
pub mod status;
