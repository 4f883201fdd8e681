use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use cartwright_core::{
    Category, Customer, Dataset, GeneratorConfig, Order, OrderItem, OrderStatus, Payment,
    PaymentMethod, PaymentStatus, Product,
};
use cartwright_generate::Generator;
use cartwright_load::{load_store, verify_store, LoadError};

#[tokio::test]
async fn load_matches_generated_counts() {
    let dir = temp_dir("roundtrip");
    let csv_dir = dir.join("csv_data");
    let db_path = dir.join("store.db");

    Generator::new(small_config(5))
        .run(&csv_dir)
        .expect("generate artifacts");

    let summary = load_store(&csv_dir, &db_path).await.expect("load store");

    assert_eq!(summary.rows_loaded, summary.verification.row_counts);
    assert_eq!(summary.verification.row_counts.customers, 20);
    assert_eq!(summary.verification.row_counts.products, 15);
    assert_eq!(summary.verification.row_counts.orders, 25);
    assert!(summary.verification.is_clean());
    assert!(db_path.exists());
}

#[tokio::test]
async fn reload_replaces_the_store() {
    let dir = temp_dir("reload");
    let csv_dir = dir.join("csv_data");
    let db_path = dir.join("store.db");

    Generator::new(small_config(6))
        .run(&csv_dir)
        .expect("generate artifacts");

    let first = load_store(&csv_dir, &db_path).await.expect("first load");
    let second = load_store(&csv_dir, &db_path).await.expect("second load");

    assert_eq!(first.verification.row_counts, second.verification.row_counts);
    assert!(second.verification.is_clean());
}

#[tokio::test]
async fn missing_artifact_is_reported() {
    let dir = temp_dir("missing");

    let err = load_store(&dir, &dir.join("store.db"))
        .await
        .expect_err("load without artifacts should fail");

    assert!(matches!(err, LoadError::MissingArtifact(_)), "{err}");
}

#[tokio::test]
async fn duplicate_sku_aborts_the_load() {
    let dir = temp_dir("dup_sku");
    let mut dataset = fixture_dataset();
    dataset.products[1].sku = dataset.products[0].sku.clone();
    write_artifacts(&dir, &dataset);

    let err = load_store(&dir, &dir.join("store.db"))
        .await
        .expect_err("duplicate sku should abort");

    assert!(matches!(err, LoadError::Db(_)), "{err}");
}

#[tokio::test]
async fn dangling_reference_aborts_the_load() {
    let dir = temp_dir("dangling");
    let mut dataset = fixture_dataset();
    dataset.payments[0].order_id = 99;
    write_artifacts(&dir, &dataset);

    let err = load_store(&dir, &dir.join("store.db"))
        .await
        .expect_err("dangling payment should abort");

    assert!(matches!(err, LoadError::Db(_)), "{err}");
}

#[tokio::test]
async fn verify_store_counts_orphans() {
    // Foreign keys stay off so the orphan row can exist at all.
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(false);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("open in-memory store");
    cartwright_load::schema::create_tables(&pool)
        .await
        .expect("create tables");

    sqlx::query(
        "INSERT INTO orders (order_id, customer_id, order_date, total_amount) \
         VALUES (1, 42, '2023-06-01 10:00:00', 19.99)",
    )
    .execute(&pool)
    .await
    .expect("insert orphan order");

    let verification = verify_store(&pool).await.expect("verify store");
    pool.close().await;

    assert_eq!(verification.row_counts.orders, 1);
    assert_eq!(verification.orphans.orders_without_customer, 1);
    assert_eq!(verification.orphans.total(), 1);
    assert!(!verification.is_clean());
}

fn small_config(seed: u64) -> GeneratorConfig {
    let mut config = GeneratorConfig::default();
    config.seed = seed;
    config.customers = 20;
    config.products = 15;
    config.orders = 25;
    config
}

fn fixture_dataset() -> Dataset {
    let order_date = datetime(2023, 10, 5, 9, 30);
    Dataset {
        customers: vec![customer(1)],
        products: vec![
            product(1, "SKU-0001-AAA"),
            product(2, "SKU-0002-BBB"),
        ],
        orders: vec![order(1, 1, order_date)],
        order_items: vec![item(1, 1, 1)],
        payments: vec![payment(1, 1, order_date + Duration::hours(2))],
    }
}

fn write_artifacts(dir: &Path, dataset: &Dataset) {
    write_csv(&dir.join("customers.csv"), &dataset.customers);
    write_csv(&dir.join("products.csv"), &dataset.products);
    write_csv(&dir.join("orders.csv"), &dataset.orders);
    write_csv(&dir.join("order_items.csv"), &dataset.order_items);
    write_csv(&dir.join("payments.csv"), &dataset.payments);
}

fn write_csv<T: serde::Serialize>(path: &Path, rows: &[T]) {
    let mut writer = csv::Writer::from_path(path).expect("open csv");
    for row in rows {
        writer.serialize(row).expect("write row");
    }
    writer.flush().expect("flush csv");
}

fn customer(customer_id: i64) -> Customer {
    Customer {
        customer_id,
        first_name: "Ada".to_string(),
        last_name: "Quinn".to_string(),
        email: "ada.quinn@example.net".to_string(),
        phone: "555-0100".to_string(),
        address: "12 Harbor Ave".to_string(),
        city: "Portland".to_string(),
        state: "Maine".to_string(),
        zip_code: "04101".to_string(),
        country: "United States".to_string(),
        date_registered: NaiveDate::from_ymd_opt(2023, 3, 14).expect("valid date"),
        is_active: true,
    }
}

fn product(product_id: i64, sku: &str) -> Product {
    Product {
        product_id,
        product_name: "Field Kettle Pro".to_string(),
        category: Category::HomeAndGarden,
        description: "Steel kettle for camp stoves.".to_string(),
        price: 49.99,
        cost: 21.50,
        stock_quantity: 40,
        sku: sku.to_string(),
        brand: "Northline".to_string(),
        created_date: NaiveDate::from_ymd_opt(2023, 5, 2).expect("valid date"),
        is_active: true,
    }
}

fn order(order_id: i64, customer_id: i64, order_date: NaiveDateTime) -> Order {
    Order {
        order_id,
        customer_id,
        order_date,
        status: OrderStatus::Delivered,
        shipping_address: "12 Harbor Ave".to_string(),
        shipping_city: "Portland".to_string(),
        shipping_state: "Maine".to_string(),
        shipping_zip: "04101".to_string(),
        shipping_country: "United States".to_string(),
        shipping_cost: 5.0,
        tax_amount: 2.5,
        subtotal: 49.99,
        total_amount: 57.49,
    }
}

fn item(item_id: i64, order_id: i64, product_id: i64) -> OrderItem {
    OrderItem {
        item_id,
        order_id,
        product_id,
        quantity: 1,
        unit_price: 49.99,
        discount: 0.0,
        subtotal: 49.99,
    }
}

fn payment(payment_id: i64, order_id: i64, payment_date: NaiveDateTime) -> Payment {
    Payment {
        payment_id,
        order_id,
        payment_date,
        payment_method: PaymentMethod::CreditCard,
        amount: 57.49,
        status: PaymentStatus::Completed,
        transaction_id: format!("TXN-{payment_id:010}"),
    }
}

fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(hour, minute, 0)
        .expect("valid time")
}

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("cartwright_load_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}
