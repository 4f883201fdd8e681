use std::collections::HashMap;

use chrono::NaiveDateTime;

use cartwright_core::{round_cents, Order, OrderItem, OrderStatus};

/// Order header before the totals pass: everything except the two derived
/// money fields.
#[derive(Debug, Clone)]
pub struct DraftOrder {
    pub order_id: i64,
    pub customer_id: i64,
    pub order_date: NaiveDateTime,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_zip: String,
    pub shipping_country: String,
    pub shipping_cost: f64,
    pub tax_amount: f64,
}

/// Fold item subtotals into their orders and derive each order total.
///
/// Pure function of the finalized items. An order with no matching items
/// keeps a zero subtotal; `total_amount` is rounded once, at the end.
pub fn finalize_orders(drafts: Vec<DraftOrder>, items: &[OrderItem]) -> Vec<Order> {
    let mut item_totals: HashMap<i64, f64> = HashMap::new();
    for item in items {
        *item_totals.entry(item.order_id).or_insert(0.0) += item.subtotal;
    }

    drafts
        .into_iter()
        .map(|draft| {
            let subtotal = item_totals.get(&draft.order_id).copied().unwrap_or(0.0);
            let total_amount = round_cents(subtotal + draft.shipping_cost + draft.tax_amount);
            Order {
                order_id: draft.order_id,
                customer_id: draft.customer_id,
                order_date: draft.order_date,
                status: draft.status,
                shipping_address: draft.shipping_address,
                shipping_city: draft.shipping_city,
                shipping_state: draft.shipping_state,
                shipping_zip: draft.shipping_zip,
                shipping_country: draft.shipping_country,
                shipping_cost: draft.shipping_cost,
                tax_amount: draft.tax_amount,
                subtotal,
                total_amount,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartwright_core::cents_eq;
    use chrono::NaiveDate;

    fn draft(order_id: i64, shipping_cost: f64, tax_amount: f64) -> DraftOrder {
        DraftOrder {
            order_id,
            customer_id: 1,
            order_date: NaiveDate::from_ymd_opt(2023, 8, 4)
                .expect("valid date")
                .and_hms_opt(15, 0, 0)
                .expect("valid time"),
            status: OrderStatus::Processing,
            shipping_address: "9 Elm Ct".to_string(),
            shipping_city: "Salem".to_string(),
            shipping_state: "Oregon".to_string(),
            shipping_zip: "97301".to_string(),
            shipping_country: "United States".to_string(),
            shipping_cost,
            tax_amount,
        }
    }

    fn line(item_id: i64, order_id: i64, subtotal: f64) -> OrderItem {
        OrderItem {
            item_id,
            order_id,
            product_id: item_id,
            quantity: 1,
            unit_price: subtotal,
            discount: 0.0,
            subtotal,
        }
    }

    #[test]
    fn folds_item_subtotals_per_order() {
        let drafts = vec![draft(1, 10.0, 5.0), draft(2, 3.5, 0.25)];
        let items = vec![line(1, 1, 19.99), line(2, 1, 5.01), line(3, 2, 100.0)];

        let orders = finalize_orders(drafts, &items);

        assert!(cents_eq(orders[0].subtotal, 25.0));
        assert!(cents_eq(orders[0].total_amount, 40.0));
        assert!(cents_eq(orders[1].subtotal, 100.0));
        assert!(cents_eq(orders[1].total_amount, 103.75));
    }

    #[test]
    fn order_without_items_gets_zero_subtotal() {
        let drafts = vec![draft(7, 4.5, 1.5)];

        let orders = finalize_orders(drafts, &[]);

        assert_eq!(orders[0].subtotal, 0.0);
        assert!(cents_eq(orders[0].total_amount, 6.0));
    }

    #[test]
    fn total_is_rounded_to_cents() {
        let drafts = vec![draft(1, 0.111, 0.222)];
        let items = vec![line(1, 1, 9.99)];

        let orders = finalize_orders(drafts, &items);

        assert_eq!(orders[0].total_amount, 10.32);
    }
}
