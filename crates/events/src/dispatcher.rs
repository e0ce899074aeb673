//! Synchronous event dispatcher (handler registry + fan-out).
//!
//! The dispatcher maps an event type name to the ordered list of handlers
//! registered under it. `notify` looks up the event's type name and invokes
//! each handler in registration order before returning.
//!
//! ## Lifecycle
//!
//! One dispatcher per composition root. Build it once, share it as
//! `Arc<EventDispatcher>` with whatever needs to register or notify, and drop
//! it at shutdown. There is no global instance.
//!
//! ## Failure policy
//!
//! The first handler that fails aborts delivery for that `notify` call and its
//! error is returned to the caller. Handlers that already ran are not rolled
//! back and later handlers are not invoked. There is no retry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::{Event, EventHandler, HandlerError};

/// Handler reference as stored in the registry.
///
/// Identity (for `unregister`) is the identity of the shared allocation, so
/// keep a clone of the `Arc` you registered if you plan to remove it later.
pub type SharedHandler = Arc<dyn EventHandler>;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// A handler failed; delivery to the remaining handlers was aborted.
    #[error("handler `{handler}` (position {position}) failed while handling `{event_type}`")]
    Handler {
        event_type: &'static str,
        handler: &'static str,
        /// Zero-based registration position of the failing handler.
        position: usize,
        #[source]
        source: HandlerError,
    },
}

/// In-process registry of event handlers.
///
/// - No IO / no async
/// - Registration order is delivery order
/// - Duplicate registrations are kept (and invoked once per registration)
#[derive(Default)]
pub struct EventDispatcher {
    registry: Mutex<HashMap<String, Vec<SharedHandler>>>,
}

impl core::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let registry = self.registry();
        let mut map = f.debug_map();
        for (name, handlers) in registry.iter() {
            let names: Vec<&'static str> = handlers.iter().map(|h| h.name()).collect();
            map.entry(name, &names);
        }
        map.finish()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    // Handlers never run while the lock is held, so a poisoned lock can only
    // come from a panic inside registry bookkeeping; the map is still usable.
    fn registry(&self) -> MutexGuard<'_, HashMap<String, Vec<SharedHandler>>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `handler` to the list for `event_name`, creating it if absent.
    pub fn register(&self, event_name: impl Into<String>, handler: SharedHandler) {
        let event_name = event_name.into();
        tracing::debug!(
            event_name = %event_name,
            handler = handler.name(),
            "registering event handler"
        );
        self.registry().entry(event_name).or_default().push(handler);
    }

    /// Remove the first registration of `handler` under `event_name`.
    ///
    /// Unknown names and handlers that are not registered are ignored.
    pub fn unregister<H>(&self, event_name: &str, handler: &Arc<H>)
    where
        H: EventHandler + ?Sized,
    {
        let target = Arc::as_ptr(handler) as *const ();
        let mut registry = self.registry();

        let Some(handlers) = registry.get_mut(event_name) else {
            tracing::debug!(event_name, "unregister: no handlers for event");
            return;
        };

        match handlers
            .iter()
            .position(|h| Arc::as_ptr(h) as *const () == target)
        {
            Some(index) => {
                let removed = handlers.remove(index);
                tracing::debug!(
                    event_name,
                    handler = removed.name(),
                    "unregistered event handler"
                );
                if handlers.is_empty() {
                    registry.remove(event_name);
                }
            }
            None => {
                tracing::debug!(event_name, "unregister: handler not registered");
            }
        }
    }

    /// Drop every registration; the dispatcher is back to its initial state.
    pub fn unregister_all(&self) {
        self.registry().clear();
        tracing::debug!("unregistered all event handlers");
    }

    /// Deliver `event` to every handler registered under its type name.
    ///
    /// Handlers are snapshotted before the first one runs: a handler may
    /// register or unregister on this dispatcher, and the change applies from
    /// the next `notify` on.
    pub fn notify(&self, event: &Event) -> Result<(), DispatchError> {
        let event_type = event.event_type();
        let handlers = self.handlers(event_type);

        if handlers.is_empty() {
            tracing::trace!(event_type, "no handlers registered");
            return Ok(());
        }

        tracing::debug!(
            event_type,
            event_id = %event.event_id(),
            handlers = handlers.len(),
            "dispatching event"
        );

        for (position, handler) in handlers.iter().enumerate() {
            tracing::trace!(event_type, handler = handler.name(), position, "invoking handler");

            if let Err(source) = handler.handle(event) {
                tracing::warn!(
                    event_type,
                    handler = handler.name(),
                    position,
                    error = %source,
                    "event handler failed; aborting delivery"
                );
                return Err(DispatchError::Handler {
                    event_type,
                    handler: handler.name(),
                    position,
                    source,
                });
            }
        }

        Ok(())
    }

    /// Handlers currently registered under `event_name`, in delivery order.
    pub fn handlers(&self, event_name: &str) -> Vec<SharedHandler> {
        self.registry()
            .get(event_name)
            .cloned()
            .unwrap_or_default()
    }

    pub fn handler_count(&self, event_name: &str) -> usize {
        self.registry().get(event_name).map_or(0, Vec::len)
    }

    /// Event names with at least one registered handler, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.registry().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CustomerAddressChanged, CustomerCreated, MemorySink, MessageSink, event_names};
    use orderdesk_core::CustomerId;

    /// Writes `label` to the shared sink on every invocation.
    struct Recorder {
        label: &'static str,
        sink: Arc<MemorySink>,
    }

    impl EventHandler for Recorder {
        fn name(&self) -> &'static str {
            self.label
        }

        fn handle(&self, _event: &Event) -> Result<(), HandlerError> {
            self.sink.emit(self.label);
            Ok(())
        }
    }

    struct Failing;

    impl EventHandler for Failing {
        fn handle(&self, _event: &Event) -> Result<(), HandlerError> {
            Err(anyhow::anyhow!("mailbox unavailable").into())
        }
    }

    fn recorder(label: &'static str, sink: &Arc<MemorySink>) -> Arc<Recorder> {
        Arc::new(Recorder {
            label,
            sink: sink.clone(),
        })
    }

    fn customer_created() -> Event {
        Event::new(CustomerCreated {
            id: CustomerId::new("c1").unwrap(),
            name: "Customer 1".to_string(),
        })
    }

    fn address_changed() -> Event {
        Event::new(CustomerAddressChanged {
            id: CustomerId::new("c1").unwrap(),
            name: "Customer 1".to_string(),
            address: "Street 1, 1 Zipcode 1 City 1".to_string(),
        })
    }

    #[test]
    fn register_appends_under_event_name() {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = EventDispatcher::new();
        let handler = recorder("a", &sink);

        dispatcher.register(event_names::CUSTOMER_CREATED, handler.clone());

        let handlers = dispatcher.handlers(event_names::CUSTOMER_CREATED);
        assert_eq!(handlers.len(), 1);
        assert_eq!(handlers[0].name(), "a");
        assert_eq!(dispatcher.event_names(), vec!["CustomerCreated".to_string()]);
    }

    #[test]
    fn notify_fans_out_in_registration_order() {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = EventDispatcher::new();
        dispatcher.register(event_names::CUSTOMER_CREATED, recorder("a", &sink));
        dispatcher.register(event_names::CUSTOMER_CREATED, recorder("b", &sink));
        dispatcher.register(event_names::CUSTOMER_CREATED, recorder("c", &sink));

        dispatcher.notify(&customer_created()).unwrap();

        assert_eq!(sink.messages(), vec!["a", "b", "c"]);
    }

    #[test]
    fn notify_only_reaches_handlers_of_the_event_type() {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = EventDispatcher::new();
        dispatcher.register(event_names::CUSTOMER_CREATED, recorder("created", &sink));
        dispatcher.register(event_names::CUSTOMER_ADDRESS_CHANGED, recorder("changed", &sink));

        dispatcher.notify(&address_changed()).unwrap();

        assert_eq!(sink.messages(), vec!["changed"]);
    }

    #[test]
    fn notify_without_handlers_is_ok() {
        let dispatcher = EventDispatcher::new();
        assert!(dispatcher.notify(&customer_created()).is_ok());
    }

    #[test]
    fn duplicate_registration_is_invoked_per_registration() {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = EventDispatcher::new();
        let handler = recorder("a", &sink);
        dispatcher.register(event_names::CUSTOMER_CREATED, handler.clone());
        dispatcher.register(event_names::CUSTOMER_CREATED, handler.clone());

        dispatcher.notify(&customer_created()).unwrap();
        assert_eq!(sink.messages(), vec!["a", "a"]);

        // One unregister removes one registration.
        dispatcher.unregister(event_names::CUSTOMER_CREATED, &handler);
        sink.clear();
        dispatcher.notify(&customer_created()).unwrap();
        assert_eq!(sink.messages(), vec!["a"]);
    }

    #[test]
    fn unregister_removes_only_the_matching_handler() {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = EventDispatcher::new();
        let a = recorder("a", &sink);
        let b = recorder("b", &sink);
        dispatcher.register(event_names::CUSTOMER_CREATED, a.clone());
        dispatcher.register(event_names::CUSTOMER_CREATED, b.clone());

        dispatcher.unregister(event_names::CUSTOMER_CREATED, &a);
        dispatcher.notify(&customer_created()).unwrap();

        assert_eq!(sink.messages(), vec!["b"]);
        assert_eq!(dispatcher.handler_count(event_names::CUSTOMER_CREATED), 1);
    }

    #[test]
    fn unregister_matches_identity_not_structure() {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = EventDispatcher::new();
        let registered = recorder("a", &sink);
        let lookalike = recorder("a", &sink);
        dispatcher.register(event_names::CUSTOMER_CREATED, registered.clone());

        dispatcher.unregister(event_names::CUSTOMER_CREATED, &lookalike);

        assert_eq!(dispatcher.handler_count(event_names::CUSTOMER_CREATED), 1);
    }

    #[test]
    fn unregister_accepts_type_erased_handle() {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = EventDispatcher::new();
        let handler: SharedHandler = recorder("a", &sink);
        dispatcher.register(event_names::CUSTOMER_CREATED, handler.clone());

        dispatcher.unregister(event_names::CUSTOMER_CREATED, &handler);

        assert!(dispatcher.is_empty());
    }

    #[test]
    fn unregister_unknown_is_a_noop() {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = EventDispatcher::new();
        let a = recorder("a", &sink);
        let stranger = recorder("x", &sink);
        dispatcher.register(event_names::CUSTOMER_CREATED, a.clone());

        dispatcher.unregister("NoSuchEvent", &a);
        dispatcher.unregister(event_names::CUSTOMER_CREATED, &stranger);
        dispatcher.unregister(event_names::PRODUCT_CREATED, &stranger);

        assert_eq!(dispatcher.handler_count(event_names::CUSTOMER_CREATED), 1);
    }

    #[test]
    fn unregister_all_empties_registry() {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = EventDispatcher::new();
        dispatcher.register(event_names::CUSTOMER_CREATED, recorder("a", &sink));
        dispatcher.register(event_names::CUSTOMER_ADDRESS_CHANGED, recorder("b", &sink));

        dispatcher.unregister_all();

        assert!(dispatcher.is_empty());
        assert!(dispatcher.handlers(event_names::CUSTOMER_CREATED).is_empty());
        dispatcher.notify(&customer_created()).unwrap();
        dispatcher.notify(&address_changed()).unwrap();
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn failing_handler_aborts_remaining_delivery() {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = EventDispatcher::new();
        dispatcher.register(event_names::CUSTOMER_CREATED, recorder("before", &sink));
        dispatcher.register(event_names::CUSTOMER_CREATED, Arc::new(Failing));
        dispatcher.register(event_names::CUSTOMER_CREATED, recorder("after", &sink));

        let err = dispatcher.notify(&customer_created()).unwrap_err();

        match err {
            DispatchError::Handler {
                event_type,
                position,
                source,
                ..
            } => {
                assert_eq!(event_type, "CustomerCreated");
                assert_eq!(position, 1);
                assert_eq!(source.to_string(), "mailbox unavailable");
            }
        }
        // Effects of earlier handlers stay; later handlers never ran.
        assert_eq!(sink.messages(), vec!["before"]);
    }

    #[test]
    fn closures_can_be_registered() {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = EventDispatcher::new();
        let captured = sink.clone();
        dispatcher.register(
            event_names::CUSTOMER_CREATED,
            Arc::new(move |event: &Event| -> Result<(), HandlerError> {
                captured.emit(event.event_type());
                Ok(())
            }),
        );

        dispatcher.notify(&customer_created()).unwrap();

        assert_eq!(sink.messages(), vec!["CustomerCreated"]);
    }

    #[test]
    fn handler_may_unregister_itself_during_notify() {
        struct OneShot {
            dispatcher: Arc<EventDispatcher>,
            me: Mutex<Option<SharedHandler>>,
            sink: Arc<MemorySink>,
        }

        impl EventHandler for OneShot {
            fn handle(&self, event: &Event) -> Result<(), HandlerError> {
                self.sink.emit("once");
                if let Some(me) = self.me.lock().unwrap().take() {
                    self.dispatcher.unregister(event.event_type(), &me);
                }
                Ok(())
            }
        }

        let sink = Arc::new(MemorySink::new());
        let dispatcher = Arc::new(EventDispatcher::new());
        let one_shot = Arc::new(OneShot {
            dispatcher: dispatcher.clone(),
            me: Mutex::new(None),
            sink: sink.clone(),
        });
        let shared: SharedHandler = one_shot.clone();
        *one_shot.me.lock().unwrap() = Some(shared.clone());
        dispatcher.register(event_names::CUSTOMER_CREATED, shared);

        dispatcher.notify(&customer_created()).unwrap();
        dispatcher.notify(&customer_created()).unwrap();

        assert_eq!(sink.messages(), vec!["once"]);
        assert!(dispatcher.is_empty());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: every registration is invoked exactly once, in order.
            #[test]
            fn delivery_matches_registration_order(count in 1usize..12) {
                let labels: Vec<&'static str> =
                    ["h0", "h1", "h2", "h3", "h4", "h5", "h6", "h7", "h8", "h9", "h10", "h11"]
                        [..count]
                        .to_vec();
                let sink = Arc::new(MemorySink::new());
                let dispatcher = EventDispatcher::new();
                for label in &labels {
                    dispatcher.register(event_names::CUSTOMER_CREATED, recorder(*label, &sink));
                }

                dispatcher.notify(&customer_created()).unwrap();

                prop_assert_eq!(sink.messages(), labels);
            }

            /// Property: unregistering one handler leaves the others in order.
            #[test]
            fn unregister_preserves_remaining_order(count in 2usize..8, victim in 0usize..8) {
                let victim = victim % count;
                let labels = ["h0", "h1", "h2", "h3", "h4", "h5", "h6", "h7"];
                let sink = Arc::new(MemorySink::new());
                let dispatcher = EventDispatcher::new();
                let handlers: Vec<Arc<Recorder>> =
                    labels[..count].iter().map(|l| recorder(*l, &sink)).collect();
                for h in &handlers {
                    dispatcher.register(event_names::CUSTOMER_CREATED, h.clone());
                }

                dispatcher.unregister(event_names::CUSTOMER_CREATED, &handlers[victim]);
                dispatcher.notify(&customer_created()).unwrap();

                let expected: Vec<&str> = labels[..count]
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != victim)
                    .map(|(_, l)| *l)
                    .collect();
                prop_assert_eq!(sink.messages(), expected);
            }
        }
    }
}
