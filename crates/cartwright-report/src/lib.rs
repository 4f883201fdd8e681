//! Order report over the SQLite store.
//!
//! One fixed query joins every line item with its order, customer, product,
//! and the order's completed-payment total. The rows feed a printed preview,
//! summary statistics, and a CSV export; a reduced listing is available for
//! dumping the rows alone.

pub mod errors;
pub mod export;
pub mod query;
pub mod render;
pub mod runner;
pub mod summary;

pub use errors::ReportError;
pub use query::{fetch_order_lines, OrderLine, ORDER_LINES_SQL};
pub use render::{render_report, render_rows};
pub use runner::{dump_rows, run_report, ReportOutcome};
pub use summary::{summarize, ReportSummary};
