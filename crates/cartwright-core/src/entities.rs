use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::enums::{Category, OrderStatus, PaymentMethod, PaymentStatus};

/// A registered shop customer.
///
/// Field order matches the column order of `customers.csv` and the
/// `customers` store table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub date_registered: NaiveDate,
    /// Roughly three in four customers are active.
    pub is_active: bool,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_id: i64,
    pub product_name: String,
    pub category: Category,
    pub description: String,
    pub price: f64,
    /// Acquisition cost, between 30% and 70% of the list price.
    pub cost: f64,
    pub stock_quantity: i64,
    /// Unique stock keeping unit, `SKU-` + 4 digits + `-` + 3 letters.
    pub sku: String,
    pub brand: String,
    pub created_date: NaiveDate,
    pub is_active: bool,
}

/// An order header. The two derived fields are only valid once every line
/// item of the order exists; see `cartwright-generate`'s finalize pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
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
    /// Sum of the order's item subtotals; 0 when the order has no items.
    pub subtotal: f64,
    /// `subtotal + shipping_cost + tax_amount`, rounded to cents.
    pub total_amount: f64,
}

/// One product line within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Price actually charged per unit, after the discount.
    pub unit_price: f64,
    /// Discount as a percentage: 0, 10, 15, 20, or 25.
    pub discount: f64,
    /// `unit_price * quantity`, rounded to cents.
    pub subtotal: f64,
}

/// A payment against an order. Orders carry either one full payment or a
/// split pair that sums to the order total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: i64,
    pub order_id: i64,
    pub payment_date: NaiveDateTime,
    pub payment_method: PaymentMethod,
    pub amount: f64,
    pub status: PaymentStatus,
    /// Unique transaction code, `TXN-` + 10 digits.
    pub transaction_id: String,
}
