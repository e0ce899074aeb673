//! Products domain module.
//!
//! Business rules for catalog products (no IO, no storage) and the reaction
//! that runs when a product is created.

pub mod handlers;
pub mod product;

pub use handlers::SendEmailWhenProductIsCreatedHandler;
pub use product::{Product, ProductRecord};
