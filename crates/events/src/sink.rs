//! Output channel for reactions.
//!
//! Reactions produce human-readable messages. Where those go is decided at the
//! composition root: `TracingSink` for the process log, `MemorySink` for
//! tests/dev.

use std::sync::{Arc, Mutex, PoisonError};

/// Destination for reaction messages.
pub trait MessageSink: Send + Sync {
    fn emit(&self, message: &str);
}

impl<S> MessageSink for Arc<S>
where
    S: MessageSink + ?Sized,
{
    fn emit(&self, message: &str) {
        (**self).emit(message)
    }
}

/// Writes messages to the process log at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn emit(&self, message: &str) {
        tracing::info!(target: "orderdesk::reactions", "{message}");
    }
}

/// Declare a reaction that writes to a shared [`MessageSink`].
///
/// Generates the struct with its `sink` field, `new(sink)`, and a `Default`
/// that writes to [`TracingSink`]. The caller implements `EventHandler`.
///
/// ```
/// # use orderdesk_events::MessageSink;
/// orderdesk_events::sink_handler! {
///     /// Greets on every event.
///     pub struct Greeter;
/// }
///
/// let greeter = Greeter::default();
/// greeter.sink.emit("hello");
/// ```
#[macro_export]
macro_rules! sink_handler {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        $vis struct $name {
            sink: ::std::sync::Arc<dyn $crate::MessageSink>,
        }

        impl $name {
            pub fn new(sink: ::std::sync::Arc<dyn $crate::MessageSink>) -> Self {
                Self { sink }
            }
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self::new(::std::sync::Arc::new($crate::TracingSink))
            }
        }
    };
}

/// Collects messages in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every message emitted so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl MessageSink for MemorySink {
    fn emit(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
