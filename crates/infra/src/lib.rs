//! Infrastructure layer: reference repositories and composition-root wiring.

pub mod reactions;
pub mod repository;

pub use reactions::register_reactions;
pub use repository::{
    InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository,
    InMemoryRepository, Persistable,
};
