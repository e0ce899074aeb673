//! `orderdesk-events`: in-process domain event notification.
//!
//! - [`Event`]: immutable fact (id, timestamp, typed payload)
//! - [`EventHandler`]: single-method reaction to an event
//! - [`EventDispatcher`]: registry of handlers keyed by event type name
//! - [`MessageSink`]: where reactions write their human-readable output
//!
//! Delivery is synchronous and single-process: `notify` returns once every
//! registered handler has run (or the first one has failed).

pub mod dispatcher;
pub mod event;
pub mod handler;
pub mod sink;

pub use dispatcher::{DispatchError, EventDispatcher, SharedHandler};
pub use event::{
    CustomerAddressChanged, CustomerCreated, Event, EventPayload, ProductCreated, event_names,
};
pub use handler::{EventHandler, HandlerError};
pub use sink::{MemorySink, MessageSink, TracingSink};
