use crate::query::{OrderLine, COLUMNS};
use crate::summary::ReportSummary;

const MAX_COL_WIDTH: usize = 30;

/// Render the printed report: row count, a preview table, and the summary
/// statistics block.
pub fn render_report(rows: &[OrderLine], summary: &ReportSummary, preview_limit: usize) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Total records: {}", rows.len()));
    lines.push(String::new());
    lines.push(format!("Report preview (first {preview_limit} rows):"));
    lines.extend(render_table(rows.iter().take(preview_limit)));
    lines.push(String::new());
    lines.push(format!("Full report contains {} rows.", rows.len()));
    lines.push(String::new());

    lines.push("Summary statistics:".to_string());
    lines.push(format!(
        "Total unique customers: {}",
        summary.unique_customers
    ));
    lines.push(format!("Total unique orders: {}", summary.unique_orders));
    lines.push(format!("Total unique products: {}", summary.unique_products));
    lines.push(format!("Total quantity sold: {}", summary.total_quantity));
    lines.push(format!(
        "Total revenue (from payments): {}",
        format_usd(summary.total_revenue)
    ));
    lines.push(format!(
        "Average order value: {}",
        format_usd(summary.average_order_value)
    ));

    lines.join("\n")
}

/// Render every row plus a trailing count, for the plain rows listing.
pub fn render_rows(rows: &[OrderLine]) -> String {
    let mut lines = render_table(rows.iter());
    lines.push(String::new());
    lines.push(format!("Total rows: {}", rows.len()));
    lines.join("\n")
}

fn render_table<'a, I>(rows: I) -> Vec<String>
where
    I: Iterator<Item = &'a OrderLine>,
{
    let cells: Vec<[String; 8]> = rows.map(row_cells).collect();

    let mut widths = COLUMNS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut lines = Vec::with_capacity(cells.len() + 1);
    lines.push(format_row(&COLUMNS.map(str::to_string), &widths));
    for row in &cells {
        lines.push(format_row(row, &widths));
    }
    lines
}

fn format_row(cells: &[String; 8], widths: &[usize; 8]) -> String {
    let mut parts = Vec::with_capacity(cells.len());
    for (cell, width) in cells.iter().zip(widths.iter().copied()) {
        parts.push(format!("{cell:>width$}"));
    }
    parts.join("  ")
}

fn row_cells(row: &OrderLine) -> [String; 8] {
    [
        clip(&row.customer_name),
        clip(&row.email),
        row.order_id.to_string(),
        clip(&row.order_date),
        clip(&row.product_name),
        row.quantity.to_string(),
        format!("{:.2}", row.price),
        format!("{:.2}", row.total_amount_paid),
    ]
}

/// Cap long cells at the display width, marking the cut with an ellipsis.
fn clip(value: &str) -> String {
    if value.chars().count() > MAX_COL_WIDTH {
        let kept: String = value.chars().take(MAX_COL_WIDTH - 3).collect();
        format!("{kept}...")
    } else {
        value.to_string()
    }
}

/// Format a dollar amount with thousands separators, always two decimals.
fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (index, digit) in dollars.chars().enumerate() {
        if index > 0 && (dollars.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${sign}{grouped}.{:02}", cents % 100)
}
