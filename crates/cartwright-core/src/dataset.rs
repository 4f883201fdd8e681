use serde::{Deserialize, Serialize};

use crate::entities::{Customer, Order, OrderItem, Payment, Product};

/// In-memory result of a generation run, one vector per store table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub payments: Vec<Payment>,
}

impl Dataset {
    pub fn counts(&self) -> TableCounts {
        TableCounts {
            customers: self.customers.len() as u64,
            products: self.products.len() as u64,
            orders: self.orders.len() as u64,
            order_items: self.order_items.len() as u64,
            payments: self.payments.len() as u64,
        }
    }
}

/// Per-table row counts, in store load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
    pub customers: u64,
    pub products: u64,
    pub orders: u64,
    pub order_items: u64,
    pub payments: u64,
}
