//! Event bus port: publish simulation events to interested subscribers.

use std::sync::Arc;

use roomlink_domain::event::Event;

/// The event could not be handed to the bus.
#[derive(Debug, thiserror::Error)]
#[error("event bus is closed")]
pub struct PublishError;

/// Publishes simulation events.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the bus can no longer deliver events.
    fn publish(&self, event: Event) -> Result<(), PublishError>;
}

impl<T: EventPublisher + ?Sized> EventPublisher for Arc<T> {
    fn publish(&self, event: Event) -> Result<(), PublishError> {
        (**self).publish(event)
    }
}
