//! Order-level domain services that span more than one aggregate.

use orderdesk_core::{DomainError, DomainResult, OrderId};
use orderdesk_customers::Customer;

use crate::{Order, OrderItem};

/// Stateless operations over orders.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderService;

impl OrderService {
    /// Sum of the totals of `orders`.
    ///
    /// Each order's total fits in `i64`, their sum may not.
    pub fn total<'a>(orders: impl IntoIterator<Item = &'a Order>) -> DomainResult<i64> {
        orders.into_iter().try_fold(0i64, |sum, order| {
            sum.checked_add(order.total())
                .ok_or_else(|| DomainError::validation("orders total is out of range"))
        })
    }

    /// Build an order for `customer` and credit them half its total in
    /// reward points (rounded down).
    ///
    /// Nothing is credited when the order is rejected or when half the total
    /// rounds down to zero.
    pub fn place_order(
        customer: &mut Customer,
        order_id: OrderId,
        items: Vec<OrderItem>,
    ) -> DomainResult<Order> {
        let order = Order::new(order_id, customer.id_typed().clone(), items)?;

        let points = u64::try_from(order.total() / 2).unwrap_or(0);
        if points > 0 {
            customer.add_reward_points(points)?;
        }

        Ok(order)
    }
}
