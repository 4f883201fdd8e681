use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::errors::ReportError;
use crate::export::export_csv;
use crate::query::{fetch_order_lines, OrderLine};
use crate::summary::{summarize, ReportSummary};

/// What a report run produced.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub rows: Vec<OrderLine>,
    pub summary: ReportSummary,
    pub export_path: PathBuf,
    pub bytes_written: u64,
}

/// Run the full report against the store at `db_path`: fetch the joined
/// rows, derive the summary, and export everything to `export_path`. The
/// store pool is closed whether or not the run succeeds.
pub async fn run_report(db_path: &Path, export_path: &Path) -> Result<ReportOutcome, ReportError> {
    let pool = open_store(db_path).await?;
    let outcome = report_inner(&pool, export_path).await;
    pool.close().await;

    outcome.map_err(|err| {
        error!(error = %err, "report failed");
        err
    })
}

async fn report_inner(pool: &SqlitePool, export_path: &Path) -> Result<ReportOutcome, ReportError> {
    let rows = fetch_order_lines(pool).await?;
    let summary = summarize(&rows);
    let bytes_written = export_csv(export_path, &rows)?;
    info!(
        rows = rows.len(),
        bytes = bytes_written,
        export = %export_path.display(),
        "report exported"
    );
    Ok(ReportOutcome {
        rows,
        summary,
        export_path: export_path.to_path_buf(),
        bytes_written,
    })
}

/// Fetch every report row without the summary or export pass.
pub async fn dump_rows(db_path: &Path) -> Result<Vec<OrderLine>, ReportError> {
    let pool = open_store(db_path).await?;
    let rows = fetch_order_lines(&pool).await;
    pool.close().await;
    Ok(rows?)
}

/// Open an existing store with the same settings the loader built it with.
/// A missing file is an error, never a fresh empty database.
async fn open_store(db_path: &Path) -> Result<SqlitePool, ReportError> {
    if !db_path.exists() {
        return Err(ReportError::MissingStore(db_path.to_path_buf()));
    }
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .journal_mode(SqliteJournalMode::Delete);
    Ok(SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?)
}
