use thiserror::Error;

use crate::Event;

/// Failure raised by an [`EventHandler`].
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler was registered under an event name whose payload it does
    /// not understand.
    #[error("handler `{handler}` cannot handle `{event_type}` events")]
    UnexpectedPayload {
        handler: &'static str,
        event_type: &'static str,
    },

    /// Any other failure raised by the reaction's own side effect.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandlerError {
    pub fn unexpected_payload(handler: &'static str, event: &Event) -> Self {
        Self::UnexpectedPayload {
            handler,
            event_type: event.event_type(),
        }
    }
}

/// Reaction to a domain event (side effects only).
///
/// Handlers are registered on an [`EventDispatcher`](crate::EventDispatcher)
/// under an event type name and invoked synchronously by `notify`. They cannot
/// veto or roll back the state change that produced the event; a returned
/// error only stops delivery to the handlers registered after them.
pub trait EventHandler: Send + Sync {
    /// Human-readable handler name, used in logs and errors.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    fn handle(&self, event: &Event) -> Result<(), HandlerError>;
}

impl<F> EventHandler for F
where
    F: Fn(&Event) -> Result<(), HandlerError> + Send + Sync,
{
    fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        self(event)
    }
}
