//! Client-side order history projection.
//!
//! The orders service returns one flat record per order line; this module
//! groups them by order id and resolves product names through the catalog.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use monsoon_core::{OrderId, OrderStatus, ProductId};

use crate::api::OrderLineRecord;
use crate::catalog;

/// One line of a projected order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: ProductId,
    /// Catalog name, or `Product N` for ids no longer in the catalog.
    pub name: String,
    /// Unit price as charged, in the order's purchase currency.
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// An order as displayed to the shopper, grouped from flat line records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub created_at: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    /// Currency symbol recorded at purchase time (`₹`, `£`, `A$`, ...).
    pub currency: String,
    /// Sum of `unit_price × quantity` over the order's lines.
    pub total: Decimal,
    pub items: Vec<OrderItem>,
}

/// Fold flat per-line records into orders, grouped by order id.
///
/// Orders keep the first-seen record order; the first record for an id
/// fixes the order's metadata (timestamp, status, currency).
#[must_use]
pub fn group_order_lines(records: Vec<OrderLineRecord>) -> Vec<Order> {
    let mut orders: Vec<Order> = Vec::new();

    for record in records {
        let name = catalog::find(record.product_id).map_or_else(
            || format!("Product {}", record.product_id),
            |product| product.name.to_owned(),
        );
        let unit_price = Decimal::from_f64(record.price)
            .unwrap_or_default()
            .round_dp(2);
        let item = OrderItem {
            product_id: record.product_id,
            name,
            unit_price,
            quantity: record.quantity,
        };
        let line_total = unit_price * Decimal::from(record.quantity);

        if let Some(order) = orders.iter_mut().find(|order| order.id == record.id) {
            order.items.push(item);
            order.total += line_total;
        } else {
            orders.push(Order {
                id: record.id,
                created_at: record.created_at_datetime(),
                status: record.status,
                currency: record.currency.clone(),
                total: line_total,
                items: vec![item],
            });
        }
    }

    orders
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(id: i64, product_id: i32, quantity: u32, price: f64) -> OrderLineRecord {
        OrderLineRecord {
            id: OrderId::new(id),
            user_email: Some("jane@example.com".to_owned()),
            product_id: ProductId::new(product_id),
            quantity,
            price,
            status: OrderStatus::Pending,
            created_at: "2025-03-14T09:26:53+00:00".to_owned(),
            currency: "₹".to_owned(),
        }
    }

    #[test]
    fn test_lines_group_by_order_id() {
        let orders = group_order_lines(vec![
            record(10, 1, 2, 3499.0),
            record(11, 4, 1, 1499.0),
            record(10, 2, 1, 2900.0),
        ]);

        assert_eq!(orders.len(), 2);
        let first = orders.first().unwrap();
        assert_eq!(first.id, OrderId::new(10));
        assert_eq!(first.items.len(), 2);
        assert_eq!(
            first.total,
            Decimal::from(3499) * Decimal::from(2) + Decimal::from(2900)
        );
    }

    #[test]
    fn test_product_names_resolve_through_catalog() {
        let orders = group_order_lines(vec![record(1, 1, 1, 3499.0), record(1, 999, 1, 50.0)]);
        let items = &orders.first().unwrap().items;
        assert_eq!(items.first().unwrap().name, "Classic Sneakers");
        assert_eq!(items.get(1).unwrap().name, "Product 999");
    }

    #[test]
    fn test_empty_listing() {
        assert!(group_order_lines(Vec::new()).is_empty());
    }

    #[test]
    fn test_metadata_comes_from_first_record() {
        let mut late = record(5, 2, 1, 2900.0);
        late.status = OrderStatus::Shipped;
        let orders = group_order_lines(vec![record(5, 1, 1, 3499.0), late]);
        assert_eq!(orders.first().unwrap().status, OrderStatus::Pending);
    }
}
