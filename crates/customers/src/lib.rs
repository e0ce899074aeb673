//! Customers domain module.
//!
//! Business rules for customers and their addresses, implemented purely as
//! deterministic domain logic (no IO, no storage), plus the reactions that
//! run when customer events are dispatched.

pub mod address;
pub mod customer;
pub mod handlers;

pub use address::Address;
pub use customer::{Customer, CustomerRecord};
pub use handlers::{
    CustomerAddressChangedHandler, FirstCustomerCreatedHandler, SecondCustomerCreatedHandler,
};
