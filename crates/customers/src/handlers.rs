//! Reactions to customer events.
//!
//! Each handler writes one line to its [`MessageSink`]. Register them on an
//! `EventDispatcher` under the matching name from `event_names`.

use orderdesk_events::{
    Event, EventHandler, EventPayload, HandlerError, MessageSink, sink_handler,
};

sink_handler! {
    /// First reaction to `CustomerCreated`.
    pub struct FirstCustomerCreatedHandler;
}

sink_handler! {
    /// Second reaction to `CustomerCreated`.
    pub struct SecondCustomerCreatedHandler;
}

sink_handler! {
    /// Announces a customer's new address.
    pub struct CustomerAddressChangedHandler;
}

impl EventHandler for FirstCustomerCreatedHandler {
    fn name(&self) -> &'static str {
        "first_customer_created"
    }

    fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        let EventPayload::CustomerCreated(_) = event.payload() else {
            return Err(HandlerError::unexpected_payload(self.name(), event));
        };
        self.sink.emit(&format!(
            "This is the first log of event: {}",
            event.event_type()
        ));
        Ok(())
    }
}

impl EventHandler for SecondCustomerCreatedHandler {
    fn name(&self) -> &'static str {
        "second_customer_created"
    }

    fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        let EventPayload::CustomerCreated(_) = event.payload() else {
            return Err(HandlerError::unexpected_payload(self.name(), event));
        };
        self.sink.emit(&format!(
            "This is the second log of event: {}",
            event.event_type()
        ));
        Ok(())
    }
}

impl EventHandler for CustomerAddressChangedHandler {
    fn name(&self) -> &'static str {
        "customer_address_changed"
    }

    fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        let EventPayload::CustomerAddressChanged(changed) = event.payload() else {
            return Err(HandlerError::unexpected_payload(self.name(), event));
        };
        self.sink.emit(&format!(
            "Customer address: {}, {} changed to: {}",
            changed.id, changed.name, changed.address
        ));
        Ok(())
    }
}
