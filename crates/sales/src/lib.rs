//! Orders domain module.
//!
//! Business rules for orders and their line items, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod order;
pub mod service;

pub use order::{Order, OrderItem, OrderItemRecord, OrderRecord};
pub use service::OrderService;
