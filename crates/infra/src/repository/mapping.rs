use orderdesk_core::{AggregateRoot, DomainResult};
use orderdesk_customers::{Customer, CustomerRecord};
use orderdesk_products::{Product, ProductRecord};
use orderdesk_sales::{Order, OrderRecord};

/// Mapping between an aggregate and its flat storage record.
pub trait Persistable: AggregateRoot + Sized {
    type Record: Clone + Send + Sync + 'static;

    /// Entity name used in `NotFound` errors and logs.
    const ENTITY: &'static str;

    fn key(id: &Self::Id) -> String;

    fn to_record(&self) -> Self::Record;

    fn from_record(record: Self::Record) -> DomainResult<Self>;
}

impl Persistable for Customer {
    type Record = CustomerRecord;
    const ENTITY: &'static str = "customer";

    fn key(id: &Self::Id) -> String {
        id.to_string()
    }

    fn to_record(&self) -> Self::Record {
        Customer::to_record(self)
    }

    fn from_record(record: Self::Record) -> DomainResult<Self> {
        Customer::from_record(record)
    }
}

impl Persistable for Product {
    type Record = ProductRecord;
    const ENTITY: &'static str = "product";

    fn key(id: &Self::Id) -> String {
        id.to_string()
    }

    fn to_record(&self) -> Self::Record {
        Product::to_record(self)
    }

    fn from_record(record: Self::Record) -> DomainResult<Self> {
        Product::from_record(record)
    }
}

impl Persistable for Order {
    type Record = OrderRecord;
    const ENTITY: &'static str = "order";

    fn key(id: &Self::Id) -> String {
        id.to_string()
    }

    fn to_record(&self) -> Self::Record {
        Order::to_record(self)
    }

    fn from_record(record: Self::Record) -> DomainResult<Self> {
        Order::from_record(record)
    }
}
