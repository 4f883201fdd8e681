use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use cartwright_core::{check_dataset, Dataset, GeneratorConfig};

use crate::artifacts::{self, write_dataset};
use crate::catalog::synthesize_products;
use crate::errors::GenerateError;
use crate::people::synthesize_customers;
use crate::report::{GenerationReport, TableReport};
use crate::sales::{draft_orders, synthesize_items, synthesize_payments};
use crate::totals::finalize_orders;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub out_dir: PathBuf,
    pub report: GenerationReport,
}

/// Entry point for turning a config into CSV artifacts.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Synthesize the dataset in memory, tables in dependency order so that
    /// every draw sequence is fixed by the seed.
    pub fn generate(&self) -> Result<Dataset, GenerateError> {
        self.config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        let customers = synthesize_customers(&self.config, &mut rng);
        let products = synthesize_products(&self.config, &mut rng)?;
        let drafts = draft_orders(&self.config, &mut rng);
        let order_items = synthesize_items(&self.config, &drafts, &products, &mut rng);
        let orders = finalize_orders(drafts, &order_items);
        let payments = synthesize_payments(&self.config, &orders, &mut rng)?;

        Ok(Dataset {
            customers,
            products,
            orders,
            order_items,
            payments,
        })
    }

    /// Run end to end: synthesize, gate on the integrity check, then write
    /// the five CSV artifacts and `generation_report.json` under `out_dir`.
    pub fn run(&self, out_dir: &Path) -> Result<GenerationOutcome, GenerateError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        info!(run_id = %run_id, seed = self.config.seed, "generation started");

        let dataset = self.generate()?;

        let integrity = check_dataset(&dataset);
        if !integrity.is_clean() {
            for violation in &integrity.violations {
                warn!(
                    code = %violation.code,
                    path = %violation.path,
                    "integrity violation: {}",
                    violation.message
                );
            }
            return Err(GenerateError::Integrity(integrity.violations.len() as u64));
        }

        let files = write_dataset(out_dir, &dataset)?;

        let mut report = GenerationReport::new(run_id.clone(), self.config.seed);
        let rows_requested = [
            Some(self.config.customers as u64),
            Some(self.config.products as u64),
            Some(self.config.orders as u64),
            None,
            None,
        ];
        for (file, rows_requested) in files.iter().zip(rows_requested) {
            info!(
                table = file.table,
                rows = file.rows,
                bytes = file.bytes,
                "artifact written"
            );
            report.tables.push(TableReport {
                table: file.table.to_string(),
                rows_requested,
                rows_written: file.rows,
            });
            report.bytes_written += file.bytes;
        }
        report.duration_ms = start.elapsed().as_millis() as u64;

        let report_path = out_dir.join(artifacts::REPORT_FILE);
        std::fs::write(&report_path, serde_json::to_vec_pretty(&report)?)?;

        info!(
            run_id = %run_id,
            tables = report.tables.len(),
            duration_ms = report.duration_ms,
            bytes_written = report.bytes_written,
            "generation completed"
        );
        Ok(GenerationOutcome {
            out_dir: out_dir.to_path_buf(),
            report,
        })
    }
}
