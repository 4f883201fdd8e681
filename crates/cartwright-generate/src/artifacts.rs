use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use cartwright_core::Dataset;

use crate::errors::GenerateError;

pub const CUSTOMERS_FILE: &str = "customers.csv";
pub const PRODUCTS_FILE: &str = "products.csv";
pub const ORDERS_FILE: &str = "orders.csv";
pub const ORDER_ITEMS_FILE: &str = "order_items.csv";
pub const PAYMENTS_FILE: &str = "payments.csv";
pub const REPORT_FILE: &str = "generation_report.json";

/// One CSV artifact written during a run.
#[derive(Debug, Clone)]
pub struct ArtifactFile {
    pub table: &'static str,
    pub path: PathBuf,
    pub rows: u64,
    pub bytes: u64,
}

/// Write all five tables of a dataset under `dir`, creating the directory
/// if needed. Artifacts land in dependency order.
pub fn write_dataset(dir: &Path, dataset: &Dataset) -> Result<Vec<ArtifactFile>, GenerateError> {
    fs::create_dir_all(dir)?;
    Ok(vec![
        write_table(dir, "customers", CUSTOMERS_FILE, &dataset.customers)?,
        write_table(dir, "products", PRODUCTS_FILE, &dataset.products)?,
        write_table(dir, "orders", ORDERS_FILE, &dataset.orders)?,
        write_table(dir, "order_items", ORDER_ITEMS_FILE, &dataset.order_items)?,
        write_table(dir, "payments", PAYMENTS_FILE, &dataset.payments)?,
    ])
}

/// Write one table as CSV, header row first, columns in record-field order.
fn write_table<T: Serialize>(
    dir: &Path,
    table: &'static str,
    file_name: &str,
    rows: &[T],
) -> Result<ArtifactFile, GenerateError> {
    let path = dir.join(file_name);
    let writer = BufWriter::new(File::create(&path)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::Writer::from_writer(counting);

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(ArtifactFile {
        table,
        path,
        rows: rows.len() as u64,
        bytes: counting.bytes_written(),
    })
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
