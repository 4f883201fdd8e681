//! Core contracts and helpers for Cartwright.
//!
//! This crate defines the canonical entity types, the pipeline configuration,
//! and the cross-table integrity checks shared by the generate, load, and
//! report stages.

pub mod config;
pub mod dataset;
pub mod entities;
pub mod enums;
pub mod error;
pub mod integrity;
pub mod money;

pub use config::GeneratorConfig;
pub use dataset::{Dataset, TableCounts};
pub use entities::{Customer, Order, OrderItem, Payment, Product};
pub use enums::{Category, OrderStatus, PaymentMethod, PaymentStatus};
pub use error::{Error, Result};
pub use integrity::{check_dataset, ConstraintCounts, IntegrityReport, Violation};
pub use money::{cents_eq, round_cents};
