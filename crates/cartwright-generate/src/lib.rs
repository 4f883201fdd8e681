//! Deterministic synthesis of the Cartwright e-commerce dataset.
//!
//! This crate turns a `GeneratorConfig` into customers, products, orders,
//! order items, and payments, then writes them as CSV artifacts. A single
//! seeded rng drives every draw, so a run is a pure function of its config:
//! same config, byte-identical artifacts.

pub mod artifacts;
pub mod catalog;
pub mod engine;
pub mod errors;
pub mod people;
pub mod report;
pub mod sales;
pub mod totals;

pub use engine::{Generator, GenerationOutcome};
pub use errors::GenerateError;
pub use report::{GenerationReport, TableReport};
