use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use orderdesk_core::{
    AggregateRoot, CustomerId, DomainError, DomainResult, Entity, OrderId, OrderItemId, ProductId,
};
use orderdesk_products::Product;

/// Order line: product, quantity, unit price.
///
/// Immutable once built. Owned by exactly one [`Order`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    id: OrderItemId,
    name: String,
    /// Unit price in smallest currency unit (e.g., cents).
    price: i64,
    product_id: ProductId,
    quantity: i64,
}

impl OrderItem {
    pub fn new(
        id: OrderItemId,
        name: impl Into<String>,
        price: i64,
        product_id: ProductId,
        quantity: i64,
    ) -> DomainResult<Self> {
        let item = Self {
            id,
            name: name.into(),
            price,
            product_id,
            quantity,
        };
        item.validate()?;
        Ok(item)
    }

    /// Line for `quantity` units of `product` at its current name and price.
    pub fn for_product(id: OrderItemId, product: &Product, quantity: i64) -> DomainResult<Self> {
        Self::new(
            id,
            product.name(),
            product.price(),
            product.id_typed().clone(),
            quantity,
        )
    }

    fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        if self.price < 0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        if self.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if self.price.checked_mul(self.quantity).is_none() {
            return Err(DomainError::validation("item total is out of range"));
        }
        Ok(())
    }

    pub fn id(&self) -> &OrderItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// `price * quantity`.
    pub fn total(&self) -> i64 {
        self.price * self.quantity
    }
}

/// Aggregate root: Order.
///
/// Holds at least one item. The total is always derived from the items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
}

impl Order {
    pub fn new(id: OrderId, customer_id: CustomerId, items: Vec<OrderItem>) -> DomainResult<Self> {
        ensure_items(&items)?;
        Ok(Self {
            id,
            customer_id,
            items,
        })
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Sum of every item's total, recomputed on each call.
    pub fn total(&self) -> i64 {
        self.items.iter().map(OrderItem::total).sum()
    }

    /// Replace the whole item collection. Items are never edited in place.
    pub fn replace_items(&mut self, items: Vec<OrderItem>) -> DomainResult<()> {
        ensure_items(&items)?;
        self.items = items;
        Ok(())
    }
}

fn ensure_items(items: &[OrderItem]) -> DomainResult<()> {
    if items.is_empty() {
        return Err(DomainError::validation("order must have at least one item"));
    }

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id()) {
            return Err(DomainError::validation(format!(
                "duplicate order item id: {}",
                item.id()
            )));
        }
    }

    let mut total: i64 = 0;
    for item in items {
        total = total
            .checked_add(item.total())
            .ok_or_else(|| DomainError::validation("order total is out of range"))?;
    }
    Ok(())
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Order {
    fn validate(&self) -> DomainResult<()> {
        for item in &self.items {
            item.validate()?;
        }
        ensure_items(&self.items)
    }
}

/// Flat persistence shape of an [`OrderItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub name: String,
    pub price: i64,
    pub quantity: i64,
}

/// Flat persistence shape of an [`Order`].
///
/// `total` is a cache for readers of the storage; [`Order::from_record`]
/// ignores it and the rebuilt order recomputes its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub customer_id: String,
    pub total: i64,
    pub items: Vec<OrderItemRecord>,
}

impl Order {
    pub fn to_record(&self) -> OrderRecord {
        OrderRecord {
            id: self.id.to_string(),
            customer_id: self.customer_id.to_string(),
            total: self.total(),
            items: self
                .items
                .iter()
                .map(|item| OrderItemRecord {
                    id: item.id.to_string(),
                    order_id: self.id.to_string(),
                    product_id: item.product_id.to_string(),
                    name: item.name.clone(),
                    price: item.price,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }

    pub fn from_record(record: OrderRecord) -> DomainResult<Self> {
        let order_id = OrderId::new(record.id)?;
        let items = record
            .items
            .into_iter()
            .map(|item| {
                if item.order_id != order_id.as_str() {
                    return Err(DomainError::validation(format!(
                        "item {} belongs to order {}, not {}",
                        item.id, item.order_id, order_id
                    )));
                }
                OrderItem::new(
                    OrderItemId::new(item.id)?,
                    item.name,
                    item.price,
                    ProductId::new(item.product_id)?,
                    item.quantity,
                )
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Self::new(order_id, CustomerId::new(record.customer_id)?, items)
    }
}
