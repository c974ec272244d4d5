// 🚀 Pipeline - the ten-step batch run
//
// read → parse → filter options → validate/filter → analyse → catalog →
// enrich → save enriched → report + clean export → done
//
// Fatal conditions come back as PipelineError inside anyhow; failed writes
// are collected in the outcome and never undo earlier steps.

use crate::analytics::{AnalyticsEngine, SalesAnalytics};
use crate::catalog::{create_product_mapping, fetch_all_products, ProductCatalog};
use crate::config::PipelineConfig;
use crate::enrichment::{enrich_sales_data, EnrichmentStats};
use crate::error::{OutputFailure, PipelineError};
use crate::files::{read_sales_data, save_clean_data, save_enriched_data, save_report};
use crate::parser::parse_transactions;
use crate::prompt::{display_filter_options, prompt_filters};
use crate::report::{format_currency, render_analysis};
use crate::validation::{validate_and_filter, FilterCriteria, FilterOptions, FilterSummary};
use anyhow::Result;
use chrono::Local;
use std::io;

const STEPS: usize = 10;

/// Where the filter criteria come from
#[derive(Debug, Clone)]
pub enum FilterMode {
    Fixed(FilterCriteria),
    /// Ask on stdin/stdout after showing the options
    Interactive,
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub summary: FilterSummary,
    pub analytics: SalesAnalytics,
    pub enrichment: EnrichmentStats,
    pub output_failures: Vec<OutputFailure>,
}

impl PipelineOutcome {
    /// 0 when every artifact was written, 2 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.output_failures.is_empty() {
            0
        } else {
            2
        }
    }
}

fn step(n: usize, title: &str) {
    println!("\n   [{}/{}] {}", n, STEPS, title);
}

/// Run every stage against `config`, pulling products from `catalog`
pub fn run(config: &PipelineConfig, catalog: &dyn ProductCatalog, filters: FilterMode) -> Result<PipelineOutcome> {
    println!("{}", "=".repeat(40));
    println!("      SALES ANALYTICS SYSTEM");
    println!("{}", "=".repeat(40));

    // 1. Read
    step(1, "Reading sales data...");
    let raw_lines = read_sales_data(&config.input)?;
    println!("   ✓ Successfully read {} transactions", raw_lines.len());

    // 2. Parse
    step(2, "Parsing and cleaning data...");
    let parsed = parse_transactions(&raw_lines);
    println!("   ✓ Parsed {} records", parsed.len());
    if parsed.len() < raw_lines.len() {
        log::info!("{} malformed lines discarded", raw_lines.len() - parsed.len());
    }

    // 3. Filter options
    step(3, "Filter Options Available:");
    let options = FilterOptions::from_transactions(&parsed);
    let mut stdout = io::stdout();
    display_filter_options(&mut stdout, &options)?;
    let criteria = match filters {
        FilterMode::Fixed(criteria) => criteria,
        FilterMode::Interactive => prompt_filters(&mut io::stdin().lock(), &mut stdout)?,
    };
    if !criteria.is_empty() {
        log::info!("filtering with {:?}", criteria);
    }

    // 4. Validate + filter
    step(4, "Validating transactions...");
    let outcome = validate_and_filter(&parsed, &criteria);
    let summary = outcome.summary.clone();
    let valid = outcome.transactions;
    println!("   ✓ Valid: {} | Invalid: {}", summary.final_count, summary.invalid);
    if summary.filtered_out() > 0 {
        println!("   ✓ Filtered out: {} records", summary.filtered_out());
    }
    if valid.is_empty() {
        return Err(PipelineError::NoValidData.into());
    }

    // 5. Analyse
    step(5, "Analyzing sales data...");
    let engine = AnalyticsEngine::with_limits(config.top_n, config.low_threshold);
    let analytics = engine.analyze(&valid);
    println!(
        "   ✓ Analysis complete: ${} across {} regions",
        format_currency(analytics.total_revenue),
        analytics.regions.len()
    );

    // 6. Catalog
    step(6, "Fetching product data from API...");
    let products = fetch_all_products(catalog);
    let mapping = create_product_mapping(&products);
    if products.is_empty() {
        println!("   ⚠ Warning: API fetch failed. Continuing without enrichment.");
    } else {
        println!("   ✓ Fetched {} products", products.len());
    }

    // 7. Enrich
    step(7, "Enriching sales data...");
    let enriched = enrich_sales_data(&valid, &mapping);
    let enrichment = EnrichmentStats::from_enriched(&enriched);
    println!(
        "   ✓ Enriched {}/{} transactions ({:.1}%)",
        enrichment.matched, enrichment.total, enrichment.success_rate
    );

    let mut output_failures = Vec::new();

    // 8. Enriched export
    step(8, "Saving enriched data...");
    match save_enriched_data(&config.enriched, &enriched) {
        Ok(0) => println!("   ⚠ No enriched data to save."),
        Ok(_) => println!("   ✓ Saved to: {}", config.enriched.display()),
        Err(e) => record_failure(&mut output_failures, "enriched data", &e),
    }

    // 9. Report + clean export
    step(9, "Generating report...");
    let report = render_analysis(&analytics, engine.top_n, &enriched, Local::now().naive_local());
    match save_report(&config.report, &report) {
        Ok(()) => println!("   ✓ Report saved to: {}", config.report.display()),
        Err(e) => record_failure(&mut output_failures, "report", &e),
    }
    match save_clean_data(&config.clean_data, &valid) {
        Ok(()) => println!("   ✓ Cleaned data saved to: {}", config.clean_data.display()),
        Err(e) => record_failure(&mut output_failures, "cleaned data", &e),
    }

    // 10. Done
    if output_failures.is_empty() {
        step(10, "Process Complete!");
    } else {
        step(10, "Process finished with output errors");
    }
    println!("{}", "=".repeat(40));

    Ok(PipelineOutcome {
        summary,
        analytics,
        enrichment,
        output_failures,
    })
}

fn record_failure(failures: &mut Vec<OutputFailure>, artifact: &str, error: &anyhow::Error) {
    println!("   ✗ Failed to save {}: {:#}", artifact, error);
    log::error!("output failure ({}): {:?}", artifact, error);
    failures.push(OutputFailure::new(artifact, error));
}

// ============================================================================
// TESTS
// ============================================================================
