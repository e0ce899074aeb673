//! Aggregate root trait for the order-management model.

use crate::entity::Entity;
use crate::error::DomainResult;

/// Aggregate root: an entity that owns and enforces invariants over the
/// objects it contains (an `Order` over its items, a `Customer` over its
/// activation state).
///
/// Constructors and mutators must call into the same checks so that no
/// partially-valid instance is ever observable.
pub trait AggregateRoot: Entity {
    /// Re-check every invariant of the aggregate's current state.
    ///
    /// Used when rebuilding an aggregate from a flat record handed back by a
    /// persistence collaborator, where the data may not have gone through a
    /// constructor.
    fn validate(&self) -> DomainResult<()>;
}
