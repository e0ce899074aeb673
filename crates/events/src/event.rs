use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use orderdesk_core::{CustomerId, ProductId};

/// Stable event type names, used as dispatcher registry keys.
pub mod event_names {
    pub const CUSTOMER_CREATED: &str = "CustomerCreated";
    pub const CUSTOMER_ADDRESS_CHANGED: &str = "CustomerAddressChanged";
    pub const PRODUCT_CREATED: &str = "ProductCreated";
}

/// Payload: a customer was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCreated {
    pub id: CustomerId,
    pub name: String,
}

/// Payload: a customer's address changed.
///
/// `address` is already rendered to its display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddressChanged {
    pub id: CustomerId,
    pub name: String,
    pub address: String,
}

/// Payload: a product was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub id: ProductId,
    pub name: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: i64,
}

/// Closed set of event payloads.
///
/// The dispatcher never inspects the payload; it only routes on
/// [`EventPayload::event_type`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EventPayload {
    CustomerCreated(CustomerCreated),
    CustomerAddressChanged(CustomerAddressChanged),
    ProductCreated(ProductCreated),
}

impl EventPayload {
    /// Stable event name/type identifier.
    pub fn event_type(&self) -> &'static str {
        match self {
            EventPayload::CustomerCreated(_) => event_names::CUSTOMER_CREATED,
            EventPayload::CustomerAddressChanged(_) => event_names::CUSTOMER_ADDRESS_CHANGED,
            EventPayload::ProductCreated(_) => event_names::PRODUCT_CREATED,
        }
    }
}

impl From<CustomerCreated> for EventPayload {
    fn from(value: CustomerCreated) -> Self {
        EventPayload::CustomerCreated(value)
    }
}

impl From<CustomerAddressChanged> for EventPayload {
    fn from(value: CustomerAddressChanged) -> Self {
        EventPayload::CustomerAddressChanged(value)
    }
}

impl From<ProductCreated> for EventPayload {
    fn from(value: ProductCreated) -> Self {
        EventPayload::ProductCreated(value)
    }
}

/// A domain event.
///
/// Events are **immutable** facts: all fields are set at construction and
/// only exposed through accessors. They are not persisted and are dropped
/// once dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    event_id: Uuid,
    occurred_at: DateTime<Utc>,
    payload: EventPayload,
}

impl Event {
    /// Create an event that occurred now.
    pub fn new(payload: impl Into<EventPayload>) -> Self {
        Self::with_occurred_at(payload, Utc::now())
    }

    /// Create an event with an explicit business time.
    pub fn with_occurred_at(payload: impl Into<EventPayload>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            occurred_at,
            payload: payload.into(),
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    /// When the event occurred (business time).
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }
}
