//! Composition-root wiring for the built-in reactions.

use std::sync::Arc;

use orderdesk_customers::{
    CustomerAddressChangedHandler, FirstCustomerCreatedHandler, SecondCustomerCreatedHandler,
};
use orderdesk_events::{EventDispatcher, MessageSink, event_names};
use orderdesk_products::SendEmailWhenProductIsCreatedHandler;

/// Register every built-in reaction on `dispatcher`, writing to `sink`.
///
/// `CustomerCreated` gets the first/second pair in that order.
pub fn register_reactions(dispatcher: &EventDispatcher, sink: Arc<dyn MessageSink>) {
    dispatcher.register(
        event_names::CUSTOMER_CREATED,
        Arc::new(FirstCustomerCreatedHandler::new(sink.clone())),
    );
    dispatcher.register(
        event_names::CUSTOMER_CREATED,
        Arc::new(SecondCustomerCreatedHandler::new(sink.clone())),
    );
    dispatcher.register(
        event_names::CUSTOMER_ADDRESS_CHANGED,
        Arc::new(CustomerAddressChangedHandler::new(sink.clone())),
    );
    dispatcher.register(
        event_names::PRODUCT_CREATED,
        Arc::new(SendEmailWhenProductIsCreatedHandler::new(sink)),
    );

    tracing::info!(events = ?dispatcher.event_names(), "registered built-in reactions");
}
