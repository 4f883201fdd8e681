use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunable inputs for a generation run.
///
/// Every distribution the generator draws from is parameterized here, so a
/// run is fully described by this struct alone. Date windows are anchored on
/// `reference_date` rather than the wall clock; two runs with the same
/// config produce byte-identical artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Seed for the deterministic rng.
    pub seed: u64,
    /// Number of customers to synthesize.
    pub customers: usize,
    /// Number of products to synthesize.
    pub products: usize,
    /// Number of orders to synthesize.
    pub orders: usize,
    /// Anchor instant for every date window.
    pub reference_date: NaiveDateTime,
    /// Days before the anchor a customer may have registered.
    pub registration_window_days: i64,
    /// Days before the anchor a product may have been added.
    pub catalog_window_days: i64,
    /// Days before the anchor an order may have been placed.
    pub order_window_days: i64,
    /// Inclusive list-price range for products.
    pub price_range: (f64, f64),
    /// Inclusive cost-to-price ratio range.
    pub cost_ratio_range: (f64, f64),
    /// Largest stock quantity on hand.
    pub max_stock: i64,
    /// Probability a customer or product carries the active flag.
    pub active_rate: f64,
    /// Largest shipping cost per order.
    pub max_shipping: f64,
    /// Largest tax amount per order.
    pub max_tax: f64,
    /// Most distinct products a single order may contain.
    pub max_items_per_order: usize,
    /// Largest quantity for a single line item.
    pub max_quantity: i64,
    /// Discount wheel as fractions; repeated zeros weight the no-discount
    /// case. Items store the drawn value as a percentage.
    pub discount_choices: Vec<f64>,
    /// Probability an order settles with a single full payment.
    pub single_payment_rate: f64,
    /// Fraction of the total covered by the first leg of a split payment.
    pub split_first_fraction: f64,
    /// Days after the order within which a split's first leg lands.
    pub split_first_window_days: i64,
    /// Days after the order by which every payment lands.
    pub payment_window_days: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let reference_date = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap_or_default()
            .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
        Self {
            seed: 42,
            customers: 150,
            products: 100,
            orders: 180,
            reference_date,
            registration_window_days: 730,
            catalog_window_days: 365,
            order_window_days: 365,
            price_range: (5.99, 999.99),
            cost_ratio_range: (0.3, 0.7),
            max_stock: 500,
            active_rate: 0.75,
            max_shipping: 25.99,
            max_tax: 50.0,
            max_items_per_order: 5,
            max_quantity: 5,
            discount_choices: vec![0.0, 0.0, 0.0, 0.0, 0.10, 0.15, 0.20, 0.25],
            single_payment_rate: 0.75,
            split_first_fraction: 0.6,
            split_first_window_days: 3,
            payment_window_days: 7,
        }
    }
}

impl GeneratorConfig {
    /// Validate the config before a run. Checks ordering of every range and
    /// that probabilities are actual probabilities.
    pub fn validate(&self) -> Result<()> {
        if self.customers == 0 {
            return Err(Error::InvalidConfig("customers must be at least 1".into()));
        }
        if self.products == 0 {
            return Err(Error::InvalidConfig("products must be at least 1".into()));
        }
        if self.orders == 0 {
            return Err(Error::InvalidConfig("orders must be at least 1".into()));
        }
        for (label, days) in [
            ("registration_window_days", self.registration_window_days),
            ("catalog_window_days", self.catalog_window_days),
            ("order_window_days", self.order_window_days),
            ("split_first_window_days", self.split_first_window_days),
            ("payment_window_days", self.payment_window_days),
        ] {
            if days < 1 {
                return Err(Error::InvalidConfig(format!(
                    "{label} must be at least 1, got {days}"
                )));
            }
        }
        if self.split_first_window_days > self.payment_window_days {
            return Err(Error::InvalidConfig(format!(
                "split_first_window_days {} exceeds payment_window_days {}",
                self.split_first_window_days, self.payment_window_days
            )));
        }
        let (price_min, price_max) = self.price_range;
        if !(price_min > 0.0 && price_min <= price_max) {
            return Err(Error::InvalidConfig(format!(
                "price_range must satisfy 0 < min <= max, got ({price_min}, {price_max})"
            )));
        }
        let (ratio_min, ratio_max) = self.cost_ratio_range;
        if !(ratio_min > 0.0 && ratio_min <= ratio_max && ratio_max <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "cost_ratio_range must satisfy 0 < min <= max <= 1, got ({ratio_min}, {ratio_max})"
            )));
        }
        for (label, rate) in [
            ("active_rate", self.active_rate),
            ("single_payment_rate", self.single_payment_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::InvalidConfig(format!(
                    "{label} must be within [0, 1], got {rate}"
                )));
            }
        }
        if !(self.split_first_fraction > 0.0 && self.split_first_fraction < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "split_first_fraction must be within (0, 1), got {}",
                self.split_first_fraction
            )));
        }
        if self.max_stock < 0 {
            return Err(Error::InvalidConfig(format!(
                "max_stock must not be negative, got {}",
                self.max_stock
            )));
        }
        if self.max_shipping < 0.0 || self.max_tax < 0.0 {
            return Err(Error::InvalidConfig(
                "max_shipping and max_tax must not be negative".into(),
            ));
        }
        if self.max_items_per_order == 0 {
            return Err(Error::InvalidConfig(
                "max_items_per_order must be at least 1".into(),
            ));
        }
        if self.max_quantity < 1 {
            return Err(Error::InvalidConfig(
                "max_quantity must be at least 1".into(),
            ));
        }
        if self.discount_choices.is_empty() {
            return Err(Error::InvalidConfig(
                "discount_choices must not be empty".into(),
            ));
        }
        if let Some(bad) = self
            .discount_choices
            .iter()
            .find(|d| !(0.0..1.0).contains(*d))
        {
            return Err(Error::InvalidConfig(format!(
                "discount_choices must be fractions within [0, 1), got {bad}"
            )));
        }
        Ok(())
    }
}
