use orderdesk_events::{
    Event, EventHandler, EventPayload, HandlerError, MessageSink, sink_handler,
};

sink_handler! {
    /// Sends the "new product" notification when a product is created.
    ///
    /// Delivery is whatever the sink does with the message; this handler only
    /// formats it.
    pub struct SendEmailWhenProductIsCreatedHandler;
}

impl EventHandler for SendEmailWhenProductIsCreatedHandler {
    fn name(&self) -> &'static str {
        "send_email_when_product_is_created"
    }

    fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        let EventPayload::ProductCreated(created) = event.payload() else {
            return Err(HandlerError::unexpected_payload(self.name(), event));
        };
        self.sink.emit(&format!(
            "Sending email for product {}: {} ({})",
            created.id, created.name, created.price
        ));
        Ok(())
    }
}
