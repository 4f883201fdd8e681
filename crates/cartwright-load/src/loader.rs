use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use cartwright_core::{Customer, Dataset, Order, OrderItem, Payment, Product, TableCounts};

use crate::errors::LoadError;
use crate::schema;
use crate::verify::{verify_store, StoreVerification};

const CUSTOMERS_FILE: &str = "customers.csv";
const PRODUCTS_FILE: &str = "products.csv";
const ORDERS_FILE: &str = "orders.csv";
const ORDER_ITEMS_FILE: &str = "order_items.csv";
const PAYMENTS_FILE: &str = "payments.csv";

/// What a completed load produced.
#[derive(Debug, Clone)]
pub struct LoadSummary {
    pub db_path: PathBuf,
    pub rows_loaded: TableCounts,
    pub verification: StoreVerification,
}

/// Load the CSV artifacts under `csv_dir` into a fresh store at `db_path`.
///
/// Any existing database file at the path is removed first. Foreign keys
/// are enforced during the load, so artifacts with dangling references
/// abort with a database error. A successful load always ends with the
/// verification pass.
pub async fn load_store(csv_dir: &Path, db_path: &Path) -> Result<LoadSummary, LoadError> {
    let dataset = read_artifacts(csv_dir)?;

    remove_stale_store(db_path)?;

    let pool = open_store(db_path).await?;
    let outcome = build_store(&pool, &dataset).await;
    pool.close().await;

    let verification = outcome?;
    info!(db = %db_path.display(), "store loaded");
    Ok(LoadSummary {
        db_path: db_path.to_path_buf(),
        rows_loaded: dataset.counts(),
        verification,
    })
}

/// Remove a prior store file along with any journal siblings left behind
/// by an interrupted run.
fn remove_stale_store(db_path: &Path) -> Result<(), LoadError> {
    let mut stale = vec![db_path.to_path_buf()];
    if let Some(name) = db_path.file_name().and_then(|name| name.to_str()) {
        stale.push(db_path.with_file_name(format!("{name}-wal")));
        stale.push(db_path.with_file_name(format!("{name}-shm")));
    }
    for path in stale {
        if path.exists() {
            fs::remove_file(&path)?;
            info!(path = %path.display(), "removed stale store file");
        }
    }
    Ok(())
}

/// Open the store with foreign keys enforced and a single-file journal.
async fn open_store(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Delete);
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
}

async fn build_store(pool: &SqlitePool, dataset: &Dataset) -> Result<StoreVerification, LoadError> {
    schema::create_tables(pool).await?;
    insert_customers(pool, &dataset.customers).await?;
    insert_products(pool, &dataset.products).await?;
    insert_orders(pool, &dataset.orders).await?;
    insert_order_items(pool, &dataset.order_items).await?;
    insert_payments(pool, &dataset.payments).await?;
    Ok(verify_store(pool).await?)
}

fn read_artifacts(csv_dir: &Path) -> Result<Dataset, LoadError> {
    Ok(Dataset {
        customers: read_table(csv_dir, CUSTOMERS_FILE)?,
        products: read_table(csv_dir, PRODUCTS_FILE)?,
        orders: read_table(csv_dir, ORDERS_FILE)?,
        order_items: read_table(csv_dir, ORDER_ITEMS_FILE)?,
        payments: read_table(csv_dir, PAYMENTS_FILE)?,
    })
}

fn read_table<T: DeserializeOwned>(dir: &Path, file_name: &str) -> Result<Vec<T>, LoadError> {
    let path = dir.join(file_name);
    if !path.exists() {
        return Err(LoadError::MissingArtifact(path));
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

async fn insert_customers(pool: &SqlitePool, customers: &[Customer]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for customer in customers {
        sqlx::query(
            r#"
            INSERT INTO customers (
                customer_id, first_name, last_name, email, phone, address,
                city, state, zip_code, country, date_registered, is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(customer.customer_id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.state)
        .bind(&customer.zip_code)
        .bind(&customer.country)
        .bind(customer.date_registered)
        .bind(customer.is_active)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    info!(table = "customers", rows = customers.len(), "table loaded");
    Ok(())
}

async fn insert_products(pool: &SqlitePool, products: &[Product]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for product in products {
        sqlx::query(
            r#"
            INSERT INTO products (
                product_id, product_name, category, description, price, cost,
                stock_quantity, sku, brand, created_date, is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(product.product_id)
        .bind(&product.product_name)
        .bind(product.category.as_str())
        .bind(&product.description)
        .bind(product.price)
        .bind(product.cost)
        .bind(product.stock_quantity)
        .bind(&product.sku)
        .bind(&product.brand)
        .bind(product.created_date)
        .bind(product.is_active)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    info!(table = "products", rows = products.len(), "table loaded");
    Ok(())
}

async fn insert_orders(pool: &SqlitePool, orders: &[Order]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for order in orders {
        sqlx::query(
            r#"
            INSERT INTO orders (
                order_id, customer_id, order_date, status, shipping_address,
                shipping_city, shipping_state, shipping_zip, shipping_country,
                shipping_cost, tax_amount, subtotal, total_amount
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(order.order_id)
        .bind(order.customer_id)
        .bind(order.order_date)
        .bind(order.status.as_str())
        .bind(&order.shipping_address)
        .bind(&order.shipping_city)
        .bind(&order.shipping_state)
        .bind(&order.shipping_zip)
        .bind(&order.shipping_country)
        .bind(order.shipping_cost)
        .bind(order.tax_amount)
        .bind(order.subtotal)
        .bind(order.total_amount)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    info!(table = "orders", rows = orders.len(), "table loaded");
    Ok(())
}

async fn insert_order_items(pool: &SqlitePool, items: &[OrderItem]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for item in items {
        sqlx::query(
            r#"
            INSERT INTO order_items (
                item_id, order_id, product_id, quantity, unit_price, discount, subtotal
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(item.item_id)
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.discount)
        .bind(item.subtotal)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    info!(table = "order_items", rows = items.len(), "table loaded");
    Ok(())
}

async fn insert_payments(pool: &SqlitePool, payments: &[Payment]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for payment in payments {
        sqlx::query(
            r#"
            INSERT INTO payments (
                payment_id, order_id, payment_date, payment_method, amount,
                status, transaction_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(payment.payment_id)
        .bind(payment.order_id)
        .bind(payment.payment_date)
        .bind(payment.payment_method.as_str())
        .bind(payment.amount)
        .bind(payment.status.as_str())
        .bind(&payment.transaction_id)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    info!(table = "payments", rows = payments.len(), "table loaded");
    Ok(())
}
