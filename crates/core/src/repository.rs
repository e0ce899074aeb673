//! Repository contract for persisting aggregates.
//!
//! The domain never talks to storage directly; a collaborator implements this
//! trait and maps aggregates to whatever backend it owns.

use crate::aggregate::AggregateRoot;
use crate::error::DomainResult;

/// Create/update/find contract shared by every aggregate repository.
///
/// Implementations must translate any backend-specific "no such row" condition
/// into `DomainError::NotFound`.
pub trait Repository<A>: Send + Sync
where
    A: AggregateRoot,
{
    /// Persist a new aggregate. Fails with `Conflict` if the id is taken.
    fn create(&self, aggregate: &A) -> DomainResult<()>;

    /// Overwrite an existing aggregate. Fails with `NotFound` if absent.
    fn update(&self, aggregate: &A) -> DomainResult<()>;

    /// Load an aggregate by id.
    fn find(&self, id: &A::Id) -> DomainResult<A>;

    /// Load every persisted aggregate.
    fn find_all(&self) -> DomainResult<Vec<A>>;
}

impl<A, R> Repository<A> for std::sync::Arc<R>
where
    A: AggregateRoot,
    R: Repository<A> + ?Sized,
{
    fn create(&self, aggregate: &A) -> DomainResult<()> {
        (**self).create(aggregate)
    }

    fn update(&self, aggregate: &A) -> DomainResult<()> {
        (**self).update(aggregate)
    }

    fn find(&self, id: &A::Id) -> DomainResult<A> {
        (**self).find(id)
    }

    fn find_all(&self) -> DomainResult<Vec<A>> {
        (**self).find_all()
    }
}
