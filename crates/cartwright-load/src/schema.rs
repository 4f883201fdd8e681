//! Store DDL. Declared types follow SQLite affinity rules: dates and enums
//! land as TEXT, money as REAL, booleans as INTEGER.

use sqlx::SqlitePool;

pub const CREATE_CUSTOMERS: &str = r#"
CREATE TABLE customers (
    customer_id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT,
    address TEXT,
    city TEXT,
    state TEXT,
    zip_code TEXT,
    country TEXT,
    date_registered TEXT,
    is_active INTEGER
)
"#;

pub const CREATE_PRODUCTS: &str = r#"
CREATE TABLE products (
    product_id INTEGER PRIMARY KEY,
    product_name TEXT NOT NULL,
    category TEXT,
    description TEXT,
    price REAL NOT NULL,
    cost REAL,
    stock_quantity INTEGER,
    sku TEXT UNIQUE,
    brand TEXT,
    created_date TEXT,
    is_active INTEGER
)
"#;

pub const CREATE_ORDERS: &str = r#"
CREATE TABLE orders (
    order_id INTEGER PRIMARY KEY,
    customer_id INTEGER NOT NULL,
    order_date TEXT NOT NULL,
    status TEXT,
    shipping_address TEXT,
    shipping_city TEXT,
    shipping_state TEXT,
    shipping_zip TEXT,
    shipping_country TEXT,
    shipping_cost REAL,
    tax_amount REAL,
    subtotal REAL,
    total_amount REAL NOT NULL,
    FOREIGN KEY (customer_id) REFERENCES customers(customer_id)
)
"#;

pub const CREATE_ORDER_ITEMS: &str = r#"
CREATE TABLE order_items (
    item_id INTEGER PRIMARY KEY,
    order_id INTEGER NOT NULL,
    product_id INTEGER NOT NULL,
    quantity INTEGER NOT NULL,
    unit_price REAL NOT NULL,
    discount REAL,
    subtotal REAL NOT NULL,
    FOREIGN KEY (order_id) REFERENCES orders(order_id),
    FOREIGN KEY (product_id) REFERENCES products(product_id)
)
"#;

pub const CREATE_PAYMENTS: &str = r#"
CREATE TABLE payments (
    payment_id INTEGER PRIMARY KEY,
    order_id INTEGER NOT NULL,
    payment_date TEXT NOT NULL,
    payment_method TEXT,
    amount REAL NOT NULL,
    status TEXT,
    transaction_id TEXT UNIQUE,
    FOREIGN KEY (order_id) REFERENCES orders(order_id)
)
"#;

/// Create the five store tables, parents before children.
pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for ddl in [
        CREATE_CUSTOMERS,
        CREATE_PRODUCTS,
        CREATE_ORDERS,
        CREATE_ORDER_ITEMS,
        CREATE_PAYMENTS,
    ] {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}
