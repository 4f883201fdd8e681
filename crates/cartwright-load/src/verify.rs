use sqlx::SqlitePool;

use cartwright_core::TableCounts;

/// Row and orphan counts observed after a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreVerification {
    pub row_counts: TableCounts,
    pub orphans: OrphanCounts,
}

impl StoreVerification {
    pub fn is_clean(&self) -> bool {
        self.orphans.total() == 0
    }
}

/// Child rows whose parent row is missing, per foreign key edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrphanCounts {
    pub orders_without_customer: u64,
    pub order_items_without_order: u64,
    pub order_items_without_product: u64,
    pub payments_without_order: u64,
}

impl OrphanCounts {
    pub fn total(&self) -> u64 {
        self.orders_without_customer
            + self.order_items_without_order
            + self.order_items_without_product
            + self.payments_without_order
    }
}

/// Count rows per table and orphaned children per foreign key edge. Runs
/// against the live store, whether or not foreign keys were enforced when
/// it was built.
pub async fn verify_store(pool: &SqlitePool) -> Result<StoreVerification, sqlx::Error> {
    let row_counts = TableCounts {
        customers: count_rows(pool, "SELECT COUNT(*) FROM customers").await?,
        products: count_rows(pool, "SELECT COUNT(*) FROM products").await?,
        orders: count_rows(pool, "SELECT COUNT(*) FROM orders").await?,
        order_items: count_rows(pool, "SELECT COUNT(*) FROM order_items").await?,
        payments: count_rows(pool, "SELECT COUNT(*) FROM payments").await?,
    };

    let orphans = OrphanCounts {
        orders_without_customer: count_rows(
            pool,
            "SELECT COUNT(*) FROM orders \
             WHERE customer_id NOT IN (SELECT customer_id FROM customers)",
        )
        .await?,
        order_items_without_order: count_rows(
            pool,
            "SELECT COUNT(*) FROM order_items \
             WHERE order_id NOT IN (SELECT order_id FROM orders)",
        )
        .await?,
        order_items_without_product: count_rows(
            pool,
            "SELECT COUNT(*) FROM order_items \
             WHERE product_id NOT IN (SELECT product_id FROM products)",
        )
        .await?,
        payments_without_order: count_rows(
            pool,
            "SELECT COUNT(*) FROM payments \
             WHERE order_id NOT IN (SELECT order_id FROM orders)",
        )
        .await?,
    };

    Ok(StoreVerification {
        row_counts,
        orphans,
    })
}

async fn count_rows(pool: &SqlitePool, sql: &str) -> Result<u64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
    Ok(count as u64)
}
