use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::query::OrderLine;

/// Aggregates derived from the flattened report rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub rows: u64,
    pub unique_customers: u64,
    pub unique_orders: u64,
    pub unique_products: u64,
    pub total_quantity: i64,
    pub total_revenue: f64,
    pub average_order_value: f64,
}

/// Summarize report rows. Revenue sums the paid total of every row; the
/// average order value takes one paid total per distinct order.
pub fn summarize(rows: &[OrderLine]) -> ReportSummary {
    let mut customers = HashSet::new();
    let mut products = HashSet::new();
    let mut order_totals: HashMap<i64, f64> = HashMap::new();
    let mut total_quantity = 0_i64;
    let mut total_revenue = 0.0;

    for row in rows {
        customers.insert(row.customer_name.as_str());
        products.insert(row.product_name.as_str());
        order_totals
            .entry(row.order_id)
            .or_insert(row.total_amount_paid);
        total_quantity += row.quantity;
        total_revenue += row.total_amount_paid;
    }

    let average_order_value = if order_totals.is_empty() {
        0.0
    } else {
        order_totals.values().sum::<f64>() / order_totals.len() as f64
    };

    ReportSummary {
        rows: rows.len() as u64,
        unique_customers: customers.len() as u64,
        unique_orders: order_totals.len() as u64,
        unique_products: products.len() as u64,
        total_quantity,
        total_revenue,
        average_order_value,
    }
}
