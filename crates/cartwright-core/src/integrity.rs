use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::entities::{Order, Payment, Product};
use crate::enums::PaymentStatus;
use crate::money::{cents_eq, round_cents};

/// Structured violation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub code: String,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_id: Option<i64>,
}

/// Counters for one family of checks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConstraintStats {
    pub checked: u64,
    pub violations: u64,
}

/// Per-family counters for a dataset check.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConstraintCounts {
    pub foreign_keys: ConstraintStats,
    pub unique: ConstraintStats,
    pub order_items: ConstraintStats,
    pub order_totals: ConstraintStats,
    pub payments: ConstraintStats,
}

/// Outcome of checking a dataset against the cross-table contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub counts: ConstraintCounts,
    pub violations: Vec<Violation>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check every cross-table invariant of an in-memory dataset.
///
/// Pure over the rows; requires no store. The generator gates its artifact
/// output on a clean report, and tests run it against hand-built fixtures.
pub fn check_dataset(dataset: &Dataset) -> IntegrityReport {
    let mut report = IntegrityReport {
        counts: ConstraintCounts::default(),
        violations: Vec::new(),
    };

    let customer_ids: HashSet<i64> = dataset
        .customers
        .iter()
        .map(|customer| customer.customer_id)
        .collect();
    let product_ids: HashSet<i64> = dataset
        .products
        .iter()
        .map(|product| product.product_id)
        .collect();
    let order_ids: HashSet<i64> = dataset.orders.iter().map(|order| order.order_id).collect();
    let products_by_id: HashMap<i64, &Product> = dataset
        .products
        .iter()
        .map(|product| (product.product_id, product))
        .collect();
    let orders_by_id: HashMap<i64, &Order> = dataset
        .orders
        .iter()
        .map(|order| (order.order_id, order))
        .collect();

    check_foreign_keys(
        dataset,
        &customer_ids,
        &order_ids,
        &product_ids,
        &mut report.counts.foreign_keys,
        &mut report.violations,
    );
    check_unique_codes(dataset, &mut report.counts.unique, &mut report.violations);
    check_order_items(
        dataset,
        &products_by_id,
        &mut report.counts.order_items,
        &mut report.violations,
    );
    check_order_totals(
        dataset,
        &mut report.counts.order_totals,
        &mut report.violations,
    );
    check_payments(
        dataset,
        &orders_by_id,
        &mut report.counts.payments,
        &mut report.violations,
    );

    report.violations.sort_by(|a, b| {
        (a.code.as_str(), a.row_id, a.path.as_str()).cmp(&(
            b.code.as_str(),
            b.row_id,
            b.path.as_str(),
        ))
    });
    report
}

fn violation(code: &str, path: &str, message: String, row_id: i64) -> Violation {
    Violation {
        code: code.to_string(),
        path: path.to_string(),
        message,
        row_id: Some(row_id),
    }
}

fn check_foreign_keys(
    dataset: &Dataset,
    customer_ids: &HashSet<i64>,
    order_ids: &HashSet<i64>,
    product_ids: &HashSet<i64>,
    stats: &mut ConstraintStats,
    violations: &mut Vec<Violation>,
) {
    for order in &dataset.orders {
        stats.checked += 1;
        if !customer_ids.contains(&order.customer_id) {
            stats.violations += 1;
            violations.push(violation(
                "fk.orders.customer_id",
                "orders.customer_id",
                format!(
                    "order {} references missing customer {}",
                    order.order_id, order.customer_id
                ),
                order.order_id,
            ));
        }
    }
    for item in &dataset.order_items {
        stats.checked += 1;
        if !order_ids.contains(&item.order_id) {
            stats.violations += 1;
            violations.push(violation(
                "fk.order_items.order_id",
                "order_items.order_id",
                format!(
                    "item {} references missing order {}",
                    item.item_id, item.order_id
                ),
                item.item_id,
            ));
        }
        stats.checked += 1;
        if !product_ids.contains(&item.product_id) {
            stats.violations += 1;
            violations.push(violation(
                "fk.order_items.product_id",
                "order_items.product_id",
                format!(
                    "item {} references missing product {}",
                    item.item_id, item.product_id
                ),
                item.item_id,
            ));
        }
    }
    for payment in &dataset.payments {
        stats.checked += 1;
        if !order_ids.contains(&payment.order_id) {
            stats.violations += 1;
            violations.push(violation(
                "fk.payments.order_id",
                "payments.order_id",
                format!(
                    "payment {} references missing order {}",
                    payment.payment_id, payment.order_id
                ),
                payment.payment_id,
            ));
        }
    }
}

fn check_unique_codes(
    dataset: &Dataset,
    stats: &mut ConstraintStats,
    violations: &mut Vec<Violation>,
) {
    let mut seen_skus: HashMap<&str, i64> = HashMap::new();
    for product in &dataset.products {
        stats.checked += 1;
        if let Some(first) = seen_skus.insert(product.sku.as_str(), product.product_id) {
            stats.violations += 1;
            violations.push(violation(
                "unique.products.sku",
                "products.sku",
                format!(
                    "sku '{}' on product {} already used by product {}",
                    product.sku, product.product_id, first
                ),
                product.product_id,
            ));
        }
    }

    let mut seen_codes: HashMap<&str, i64> = HashMap::new();
    for payment in &dataset.payments {
        stats.checked += 1;
        if let Some(first) = seen_codes.insert(payment.transaction_id.as_str(), payment.payment_id)
        {
            stats.violations += 1;
            violations.push(violation(
                "unique.payments.transaction_id",
                "payments.transaction_id",
                format!(
                    "transaction '{}' on payment {} already used by payment {}",
                    payment.transaction_id, payment.payment_id, first
                ),
                payment.payment_id,
            ));
        }
    }
}

fn check_order_items(
    dataset: &Dataset,
    products_by_id: &HashMap<i64, &Product>,
    stats: &mut ConstraintStats,
    violations: &mut Vec<Violation>,
) {
    let mut seen_pairs: HashSet<(i64, i64)> = HashSet::new();
    for item in &dataset.order_items {
        stats.checked += 1;
        if !seen_pairs.insert((item.order_id, item.product_id)) {
            stats.violations += 1;
            violations.push(violation(
                "items.duplicate_product",
                "order_items.product_id",
                format!(
                    "order {} lists product {} more than once",
                    item.order_id, item.product_id
                ),
                item.item_id,
            ));
        }

        if let Some(product) = products_by_id.get(&item.product_id) {
            stats.checked += 1;
            let expected_unit = round_cents(product.price * (1.0 - item.discount / 100.0));
            if !cents_eq(item.unit_price, expected_unit) {
                stats.violations += 1;
                violations.push(violation(
                    "items.unit_price",
                    "order_items.unit_price",
                    format!(
                        "item {} unit price {} does not match list price {} at {}% off",
                        item.item_id, item.unit_price, product.price, item.discount
                    ),
                    item.item_id,
                ));
            }
        }

        stats.checked += 1;
        let expected_subtotal = round_cents(item.unit_price * item.quantity as f64);
        if !cents_eq(item.subtotal, expected_subtotal) {
            stats.violations += 1;
            violations.push(violation(
                "items.subtotal",
                "order_items.subtotal",
                format!(
                    "item {} subtotal {} does not equal {} x {}",
                    item.item_id, item.subtotal, item.unit_price, item.quantity
                ),
                item.item_id,
            ));
        }
    }
}

fn check_order_totals(
    dataset: &Dataset,
    stats: &mut ConstraintStats,
    violations: &mut Vec<Violation>,
) {
    let mut item_totals: HashMap<i64, f64> = HashMap::new();
    for item in &dataset.order_items {
        *item_totals.entry(item.order_id).or_insert(0.0) += item.subtotal;
    }

    for order in &dataset.orders {
        stats.checked += 1;
        let expected_subtotal = item_totals.get(&order.order_id).copied().unwrap_or(0.0);
        if !cents_eq(order.subtotal, expected_subtotal) {
            stats.violations += 1;
            violations.push(violation(
                "orders.subtotal",
                "orders.subtotal",
                format!(
                    "order {} subtotal {} does not match item sum {}",
                    order.order_id, order.subtotal, expected_subtotal
                ),
                order.order_id,
            ));
        }

        stats.checked += 1;
        let expected_total =
            round_cents(order.subtotal + order.shipping_cost + order.tax_amount);
        if !cents_eq(order.total_amount, expected_total) {
            stats.violations += 1;
            violations.push(violation(
                "orders.total_amount",
                "orders.total_amount",
                format!(
                    "order {} total {} does not reconcile to {}",
                    order.order_id, order.total_amount, expected_total
                ),
                order.order_id,
            ));
        }
    }
}

fn check_payments(
    dataset: &Dataset,
    orders_by_id: &HashMap<i64, &Order>,
    stats: &mut ConstraintStats,
    violations: &mut Vec<Violation>,
) {
    let mut by_order: HashMap<i64, Vec<&Payment>> = HashMap::new();
    for payment in &dataset.payments {
        by_order.entry(payment.order_id).or_default().push(payment);
        if let Some(order) = orders_by_id.get(&payment.order_id) {
            stats.checked += 1;
            if payment.payment_date <= order.order_date {
                stats.violations += 1;
                violations.push(violation(
                    "payments.date",
                    "payments.payment_date",
                    format!(
                        "payment {} does not land after order {}",
                        payment.payment_id, payment.order_id
                    ),
                    payment.payment_id,
                ));
            }
        }
    }
    for legs in by_order.values_mut() {
        legs.sort_by_key(|payment| payment.payment_id);
    }

    for order in &dataset.orders {
        let legs = by_order
            .get(&order.order_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        match legs {
            [] => {
                stats.checked += 1;
                stats.violations += 1;
                violations.push(violation(
                    "payments.coverage",
                    "payments.order_id",
                    format!("order {} has no payments", order.order_id),
                    order.order_id,
                ));
            }
            [single] => {
                stats.checked += 1;
                if !cents_eq(single.amount, order.total_amount) {
                    stats.violations += 1;
                    violations.push(violation(
                        "payments.amount",
                        "payments.amount",
                        format!(
                            "payment {} amount {} does not settle order total {}",
                            single.payment_id, single.amount, order.total_amount
                        ),
                        order.order_id,
                    ));
                }
            }
            [first, second] => {
                stats.checked += 3;
                if !cents_eq(first.amount + second.amount, order.total_amount) {
                    stats.violations += 1;
                    violations.push(violation(
                        "payments.amount",
                        "payments.amount",
                        format!(
                            "split legs of order {} sum to {} against total {}",
                            order.order_id,
                            first.amount + second.amount,
                            order.total_amount
                        ),
                        order.order_id,
                    ));
                }
                if first.status != PaymentStatus::Completed
                    || second.status != PaymentStatus::Completed
                {
                    stats.violations += 1;
                    violations.push(violation(
                        "payments.split_status",
                        "payments.status",
                        format!("split legs of order {} must both be Completed", order.order_id),
                        order.order_id,
                    ));
                }
                if first.payment_date >= second.payment_date {
                    stats.violations += 1;
                    violations.push(violation(
                        "payments.split_order",
                        "payments.payment_date",
                        format!(
                            "split legs of order {} are not in timestamp order",
                            order.order_id
                        ),
                        order.order_id,
                    ));
                }
            }
            more => {
                stats.checked += 1;
                stats.violations += 1;
                violations.push(violation(
                    "payments.coverage",
                    "payments.order_id",
                    format!("order {} has {} payments", order.order_id, more.len()),
                    order.order_id,
                ));
            }
        }
    }
}
