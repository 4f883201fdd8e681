use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

/// One report row: a line item joined with its order, customer, product,
/// and the order's completed-payment total.
///
/// The paid total is aggregated per order before the join, so it repeats
/// unchanged on every line of a multi-item order. `order_date` stays the
/// store's text form so the export round-trips it byte for byte.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct OrderLine {
    pub customer_name: String,
    pub email: String,
    pub order_id: i64,
    pub order_date: String,
    pub product_name: String,
    pub quantity: i64,
    pub price: f64,
    pub total_amount_paid: f64,
}

/// Column names of [`OrderLine`], in field order.
pub const COLUMNS: [&str; 8] = [
    "customer_name",
    "email",
    "order_id",
    "order_date",
    "product_name",
    "quantity",
    "price",
    "total_amount_paid",
];

pub const ORDER_LINES_SQL: &str = r#"
SELECT
    c.first_name || ' ' || c.last_name AS customer_name,
    c.email,
    o.order_id,
    o.order_date,
    p.product_name,
    oi.quantity,
    oi.unit_price AS price,
    COALESCE(payment_totals.total_amount_paid, 0.0) AS total_amount_paid
FROM
    order_items oi
    INNER JOIN orders o ON oi.order_id = o.order_id
    INNER JOIN customers c ON o.customer_id = c.customer_id
    INNER JOIN products p ON oi.product_id = p.product_id
    LEFT JOIN (
        SELECT
            order_id,
            SUM(amount) AS total_amount_paid
        FROM payments
        WHERE status = 'Completed'
        GROUP BY order_id
    ) payment_totals ON o.order_id = payment_totals.order_id
ORDER BY
    o.order_date DESC,
    oi.item_id
"#;

/// Fetch every report row, newest orders first, line items in insertion
/// order within an order.
pub async fn fetch_order_lines(pool: &SqlitePool) -> Result<Vec<OrderLine>, sqlx::Error> {
    sqlx::query_as::<_, OrderLine>(ORDER_LINES_SQL)
        .fetch_all(pool)
        .await
}
