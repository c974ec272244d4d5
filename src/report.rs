// 📝 Report Renderer - fixed-width text report
//
// Pure: (valid transactions, enriched transactions, timestamp) → String.
// Every section is always present; empty data renders a "None" row.

use crate::analytics::{AnalyticsEngine, SalesAnalytics};
use crate::enrichment::EnrichmentStats;
use crate::transaction::{EnrichedTransaction, Transaction};
use chrono::NaiveDateTime;

const TITLE_WIDTH: usize = 50;
const TABLE_WIDTH: usize = 65;
const LOW_PERFORMER_NAMES: usize = 3;
const UNMATCHED_SAMPLE: usize = 5;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// NUMBER FORMATTING
// ============================================================================

/// `1234567.891` → `1,234,567.89`
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let Some((int_part, frac_part)) = fixed.split_once('.') else {
        // inf / NaN have no decimal point
        return fixed;
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

fn rule(ch: char, width: usize) -> String {
    ch.to_string().repeat(width)
}

// ============================================================================
// RENDERER
// ============================================================================

/// Render the full report with default analytics limits
pub fn render_report(
    transactions: &[Transaction],
    enriched: &[EnrichedTransaction],
    generated_at: NaiveDateTime,
) -> String {
    let engine = AnalyticsEngine::new();
    render_analysis(&engine.analyze(transactions), engine.top_n, enriched, generated_at)
}

/// Render already-computed analytics; `top_n` sizes the product and customer tables
pub fn render_analysis(
    analytics: &SalesAnalytics,
    top_n: usize,
    enriched: &[EnrichedTransaction],
    generated_at: NaiveDateTime,
) -> String {
    let enrichment = EnrichmentStats::from_enriched(enriched);

    let mut lines: Vec<String> = Vec::new();
    title_block(&mut lines, analytics, generated_at);
    overall_summary(&mut lines, analytics);
    region_table(&mut lines, analytics);
    product_table(&mut lines, analytics, top_n);
    customer_table(&mut lines, analytics, top_n);
    daily_table(&mut lines, analytics);
    product_performance(&mut lines, analytics);
    enrichment_summary(&mut lines, &enrichment);

    let mut report = lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    report.push('\n');
    report
}

fn title_block(lines: &mut Vec<String>, analytics: &SalesAnalytics, generated_at: NaiveDateTime) {
    lines.push(rule('=', TITLE_WIDTH));
    lines.push(format!("{:^50}", "SALES ANALYTICS REPORT"));
    lines.push(format!(
        "{:^50}",
        format!("Generated: {}", generated_at.format(TIMESTAMP_FORMAT))
    ));
    lines.push(format!(
        "{:^50}",
        format!("Records Processed: {}", analytics.transaction_count)
    ));
    lines.push(rule('=', TITLE_WIDTH));
    lines.push(String::new());
}

fn overall_summary(lines: &mut Vec<String>, analytics: &SalesAnalytics) {
    let date_range = match &analytics.date_range {
        Some((first, last)) => format!("{} to {}", first, last),
        None => "N/A".to_string(),
    };

    lines.push("OVERALL SUMMARY".to_string());
    lines.push(rule('-', TITLE_WIDTH));
    lines.push(format!("Total Revenue:       ${}", format_currency(analytics.total_revenue)));
    lines.push(format!("Total Transactions:  {}", analytics.transaction_count));
    lines.push(format!(
        "Average Order Value: ${}",
        format_currency(analytics.average_order_value)
    ));
    lines.push(format!("Date Range:          {}", date_range));
    lines.push(String::new());
}

fn table_header(lines: &mut Vec<String>, title: &str, header: String) {
    lines.push(title.to_string());
    lines.push(rule('-', TABLE_WIDTH));
    lines.push(header);
    lines.push(rule('-', TABLE_WIDTH));
}

fn region_table(lines: &mut Vec<String>, analytics: &SalesAnalytics) {
    table_header(
        lines,
        "REGION-WISE PERFORMANCE",
        format!("{:<15} {:<15} {:<15} {:<15}", "Region", "Sales", "% of Total", "Transactions"),
    );

    if analytics.regions.is_empty() {
        lines.push("None".to_string());
    }
    for region in &analytics.regions {
        lines.push(format!(
            "{:<15} ${:<14} {:<14.2}% {:<15}",
            region.region,
            format_currency(region.total_sales),
            region.percentage,
            region.transaction_count
        ));
    }
    lines.push(String::new());
}

fn product_table(lines: &mut Vec<String>, analytics: &SalesAnalytics, top_n: usize) {
    table_header(
        lines,
        &format!("TOP {} PRODUCTS", top_n),
        format!("{:<5} {:<25} {:<10} {:<15}", "Rank", "Product Name", "Quantity", "Revenue"),
    );

    if analytics.top_products.is_empty() {
        lines.push("None".to_string());
    }
    for (rank, product) in analytics.top_products.iter().enumerate() {
        lines.push(format!(
            "{:<5} {:<25} {:<10} ${}",
            rank + 1,
            product.product_name,
            product.quantity,
            format_currency(product.revenue)
        ));
    }
    lines.push(String::new());
}

fn customer_table(lines: &mut Vec<String>, analytics: &SalesAnalytics, top_n: usize) {
    table_header(
        lines,
        &format!("TOP {} CUSTOMERS", top_n),
        format!("{:<5} {:<15} {:<15} {:<10}", "Rank", "Customer ID", "Total Spent", "Orders"),
    );

    if analytics.customers.is_empty() {
        lines.push("None".to_string());
    }
    for (rank, customer) in analytics.customers.iter().take(top_n).enumerate() {
        lines.push(format!(
            "{:<5} {:<15} ${:<14} {:<10}",
            rank + 1,
            customer.customer_id,
            format_currency(customer.total_spent),
            customer.purchase_count
        ));
    }
    lines.push(String::new());
}

fn daily_table(lines: &mut Vec<String>, analytics: &SalesAnalytics) {
    table_header(
        lines,
        "DAILY SALES TREND",
        format!("{:<15} {:<15} {:<10} {:<15}", "Date", "Revenue", "Txns", "Unique Cust"),
    );

    if analytics.daily.is_empty() {
        lines.push("None".to_string());
    }
    for day in &analytics.daily {
        lines.push(format!(
            "{:<15} ${:<14} {:<10} {:<15}",
            day.date,
            format_currency(day.revenue),
            day.transaction_count,
            day.unique_customers
        ));
    }
    lines.push(String::new());
}

fn product_performance(lines: &mut Vec<String>, analytics: &SalesAnalytics) {
    lines.push("PRODUCT PERFORMANCE ANALYSIS".to_string());
    lines.push(rule('-', TITLE_WIDTH));

    match &analytics.peak_day {
        Some(peak) => lines.push(format!(
            "Best Selling Day:        {} (${})",
            peak.date,
            format_currency(peak.revenue)
        )),
        None => lines.push("Best Selling Day:        None".to_string()),
    }

    if analytics.low_performers.is_empty() {
        lines.push("Low Performing Products: None".to_string());
    } else {
        let names: Vec<&str> = analytics
            .low_performers
            .iter()
            .take(LOW_PERFORMER_NAMES)
            .map(|p| p.product_name.as_str())
            .collect();
        let more = if analytics.low_performers.len() > LOW_PERFORMER_NAMES {
            "..."
        } else {
            ""
        };
        lines.push(format!("Low Performing Products: {}{}", names.join(", "), more));
    }

    lines.push("Avg Txn Value per Region:".to_string());
    if analytics.regions.is_empty() {
        lines.push("  None".to_string());
    }
    for region in &analytics.regions {
        lines.push(format!(
            "  - {}: ${}",
            region.region,
            format_currency(region.average_transaction_value())
        ));
    }
    lines.push(String::new());
}

fn enrichment_summary(lines: &mut Vec<String>, stats: &EnrichmentStats) {
    lines.push("API ENRICHMENT SUMMARY".to_string());
    lines.push(rule('-', TITLE_WIDTH));
    lines.push(format!("Total Products Enriched: {}", stats.total));
    lines.push(format!("Successful Matches:      {}", stats.matched));
    lines.push(format!("Success Rate:            {:.2}%", stats.success_rate));

    let sample = stats.unmatched_sample(UNMATCHED_SAMPLE);
    if sample.is_empty() {
        lines.push("Missing Products (Sample): None".to_string());
    } else {
        lines.push(format!("Missing Products (Sample): {}", sample.join(", ")));
    }
    lines.push(rule('=', TITLE_WIDTH));
}

// ============================================================================
// TESTS
// ============================================================================
