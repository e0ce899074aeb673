use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::{PoisonError, RwLock};

use orderdesk_core::{DomainError, DomainResult, Repository};
use orderdesk_customers::Customer;
use orderdesk_products::Product;
use orderdesk_sales::Order;

use super::Persistable;

pub type InMemoryCustomerRepository = InMemoryRepository<Customer>;
pub type InMemoryProductRepository = InMemoryRepository<Product>;
pub type InMemoryOrderRepository = InMemoryRepository<Order>;

/// Record-backed repository held in process memory.
///
/// `find_all` returns aggregates ordered by id.
pub struct InMemoryRepository<A>
where
    A: Persistable,
{
    records: RwLock<BTreeMap<String, A::Record>>,
    _aggregate: PhantomData<fn() -> A>,
}

impl<A> core::fmt::Debug for InMemoryRepository<A>
where
    A: Persistable,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryRepository")
            .field("entity", &A::ENTITY)
            .field("len", &self.len())
            .finish()
    }
}

impl<A> InMemoryRepository<A>
where
    A: Persistable,
{
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            _aggregate: PhantomData,
        }
    }

    /// Raw stored record, as a database adapter would see it.
    pub fn record(&self, id: &A::Id) -> Option<A::Record> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&A::key(id))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<A> Default for InMemoryRepository<A>
where
    A: Persistable,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Repository<A> for InMemoryRepository<A>
where
    A: Persistable,
{
    fn create(&self, aggregate: &A) -> DomainResult<()> {
        let key = A::key(aggregate.id());
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);

        if records.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "{} {} already exists",
                A::ENTITY,
                key
            )));
        }

        tracing::debug!(entity = A::ENTITY, id = %key, "creating record");
        records.insert(key, aggregate.to_record());
        Ok(())
    }

    fn update(&self, aggregate: &A) -> DomainResult<()> {
        let key = A::key(aggregate.id());
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);

        let Some(slot) = records.get_mut(&key) else {
            return Err(DomainError::not_found(A::ENTITY, key));
        };

        tracing::debug!(entity = A::ENTITY, id = %key, "updating record");
        *slot = aggregate.to_record();
        Ok(())
    }

    fn find(&self, id: &A::Id) -> DomainResult<A> {
        let record = self
            .record(id)
            .ok_or_else(|| DomainError::not_found(A::ENTITY, A::key(id)))?;
        A::from_record(record)
    }

    fn find_all(&self) -> DomainResult<Vec<A>> {
        let records: Vec<A::Record> = self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        records.into_iter().map(A::from_record).collect()
    }
}
