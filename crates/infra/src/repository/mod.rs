//! In-memory repositories for tests/dev.
//!
//! Aggregates are stored as their flat records, the same shape a database
//! adapter would write, so every `find` goes through `from_record` and
//! re-validates.

pub mod in_memory;
pub mod mapping;

pub use in_memory::{
    InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository,
    InMemoryRepository,
};
pub use mapping::Persistable;
