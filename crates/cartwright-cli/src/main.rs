use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use cartwright_core::GeneratorConfig;
use cartwright_generate::{artifacts, GenerateError, Generator};
use cartwright_load::{load_store, LoadError, StoreVerification};
use cartwright_report::{dump_rows, render_report, render_rows, run_report, ReportError};

#[derive(Debug, Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("generate error: {0}")]
    Generate(#[from] GenerateError),
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    #[error("report error: {0}")]
    Report(#[from] ReportError),
}

#[derive(Parser, Debug)]
#[command(name = "cartwright", version, about = "Synthetic e-commerce data pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the CSV artifacts.
    Generate(GenerateArgs),
    /// Load CSV artifacts into a fresh SQLite store.
    Load(LoadArgs),
    /// Produce the order report with summary statistics and a CSV export.
    Report(ReportArgs),
    /// Print every report row without the summary or export.
    Rows(RowsArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Seed for the deterministic rng.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Number of customers to synthesize.
    #[arg(long, default_value_t = 150)]
    customers: usize,
    /// Number of products to synthesize.
    #[arg(long, default_value_t = 100)]
    products: usize,
    /// Number of orders to synthesize.
    #[arg(long, default_value_t = 180)]
    orders: usize,
    /// Output directory for the CSV artifacts.
    #[arg(long, default_value = "csv_data")]
    out_dir: PathBuf,
    /// Anchor date for every generated window, as YYYY-MM-DD.
    #[arg(long, value_name = "DATE")]
    as_of: Option<String>,
}

#[derive(Args, Debug)]
struct LoadArgs {
    /// Directory holding the CSV artifacts.
    #[arg(long, default_value = "csv_data")]
    csv_dir: PathBuf,
    /// Path of the SQLite store to (re)create.
    #[arg(long, default_value = "ecommerce.db")]
    db: PathBuf,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Path of the SQLite store to report on.
    #[arg(long, default_value = "ecommerce.db")]
    db: PathBuf,
    /// Output path for the report CSV.
    #[arg(long, default_value = "ecommerce_report.csv")]
    out: PathBuf,
    /// Rows shown in the printed preview.
    #[arg(long, default_value_t = 20)]
    preview: usize,
}

#[derive(Args, Debug)]
struct RowsArgs {
    /// Path of the SQLite store to report on.
    #[arg(long, default_value = "ecommerce.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_logging()?;

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Load(args) => run_load(args).await,
        Command::Report(args) => run_report_cmd(args).await,
        Command::Rows(args) => run_rows(args).await,
    }
}

fn init_logging() -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        seed,
        customers,
        products,
        orders,
        out_dir,
        as_of,
    } = args;

    let mut config = GeneratorConfig {
        seed,
        customers,
        products,
        orders,
        ..GeneratorConfig::default()
    };
    if let Some(date) = as_of {
        config.reference_date = parse_as_of(&date)?;
    }

    let outcome = Generator::new(config).run(&out_dir)?;

    println!("Generated artifacts in {}:", outcome.out_dir.display());
    for table in &outcome.report.tables {
        println!("  {:12} : {:>6} rows", table.table, table.rows_written);
    }
    println!(
        "Run report: {}",
        outcome.out_dir.join(artifacts::REPORT_FILE).display()
    );
    Ok(())
}

async fn run_load(args: LoadArgs) -> Result<(), CliError> {
    let LoadArgs { csv_dir, db } = args;

    let summary = load_store(&csv_dir, &db).await?;

    println!("Loaded store: {}", summary.db_path.display());
    print_verification(&summary.verification);
    Ok(())
}

async fn run_report_cmd(args: ReportArgs) -> Result<(), CliError> {
    let ReportArgs { db, out, preview } = args;

    let outcome = run_report(&db, &out).await?;

    println!("{}", render_report(&outcome.rows, &outcome.summary, preview));
    println!();
    println!("Report saved to: {}", outcome.export_path.display());
    Ok(())
}

async fn run_rows(args: RowsArgs) -> Result<(), CliError> {
    let rows = dump_rows(&args.db).await?;
    println!("{}", render_rows(&rows));
    Ok(())
}

fn print_verification(verification: &StoreVerification) {
    let counts = verification.row_counts;
    println!("Record counts:");
    println!("  {:15} : {:>5} records", "customers", counts.customers);
    println!("  {:15} : {:>5} records", "products", counts.products);
    println!("  {:15} : {:>5} records", "orders", counts.orders);
    println!("  {:15} : {:>5} records", "order_items", counts.order_items);
    println!("  {:15} : {:>5} records", "payments", counts.payments);

    let orphans = verification.orphans;
    println!("Foreign key verification:");
    println!("  Orphaned orders: {}", orphans.orders_without_customer);
    println!("  Orphaned order items: {}", orphans.order_items_without_order);
    println!(
        "  Order items with invalid products: {}",
        orphans.order_items_without_product
    );
    println!("  Orphaned payments: {}", orphans.payments_without_order);
}

/// Parse a YYYY-MM-DD anchor; generated windows run backwards from noon on
/// that day.
fn parse_as_of(value: &str) -> Result<NaiveDateTime, CliError> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|err| {
        CliError::InvalidConfig(format!("invalid --as-of date '{value}': {err}"))
    })?;
    Ok(date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()))
}
