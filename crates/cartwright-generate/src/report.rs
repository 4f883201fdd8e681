use serde::{Deserialize, Serialize};

/// Summary of one generated table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    /// Requested row count; absent for derived tables such as order items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_requested: Option<u64>,
    pub rows_written: u64,
}

/// Report for a generation run, written as `generation_report.json` next to
/// the CSV artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub tables: Vec<TableReport>,
    pub duration_ms: u64,
    pub bytes_written: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64) -> Self {
        Self {
            run_id,
            seed,
            tables: Vec::new(),
            duration_ms: 0,
            bytes_written: 0,
        }
    }

    /// Rows written for one table, when present in the report.
    pub fn rows_written(&self, table: &str) -> Option<u64> {
        self.tables
            .iter()
            .find(|entry| entry.table == table)
            .map(|entry| entry.rows_written)
    }
}
