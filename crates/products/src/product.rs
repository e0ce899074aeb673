use serde::{Deserialize, Serialize};

use orderdesk_core::{AggregateRoot, DomainError, DomainResult, Entity, ProductId};
use orderdesk_events::{Event, ProductCreated};

/// Aggregate root: Product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    /// Price in smallest currency unit (e.g., cents). Never negative.
    price: i64,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: i64) -> DomainResult<Self> {
        let product = Self {
            id,
            name: name.into(),
            price,
        };
        product.validate()?;
        Ok(product)
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        ensure_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn change_price(&mut self, price: i64) -> DomainResult<()> {
        ensure_price(price)?;
        self.price = price;
        Ok(())
    }

    /// Event describing this product's creation.
    pub fn created_event(&self) -> Event {
        Event::new(ProductCreated {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
        })
    }
}

fn ensure_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}

fn ensure_price(price: i64) -> DomainResult<()> {
    if price < 0 {
        return Err(DomainError::validation("price cannot be negative"));
    }
    Ok(())
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Product {
    fn validate(&self) -> DomainResult<()> {
        ensure_name(&self.name)?;
        ensure_price(self.price)
    }
}

/// Flat persistence shape of a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price: i64,
}

impl Product {
    pub fn to_record(&self) -> ProductRecord {
        ProductRecord {
            id: self.id.to_string(),
            name: self.name.clone(),
            price: self.price,
        }
    }

    pub fn from_record(record: ProductRecord) -> DomainResult<Self> {
        Self::new(ProductId::new(record.id)?, record.name, record.price)
    }
}
