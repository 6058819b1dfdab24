//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod behaviour;
pub mod event_bus;
pub mod renderer;
pub mod scene;

pub use behaviour::{BehaviourContext, BehaviourFactory, DeviceBehaviour};
pub use event_bus::{EventPublisher, PublishError};
pub use renderer::LinkRenderer;
pub use scene::{RayHit, SceneGeometry};
