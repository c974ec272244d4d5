// Sales Analytics - Core Library
// Parse → validate/filter → analyse → enrich → report, usable from the CLI and tests

pub mod transaction;
pub mod parser;
pub mod validation;
pub mod analytics;
pub mod catalog;
pub mod enrichment;
pub mod report;
pub mod files;
pub mod prompt;
pub mod config;
pub mod error;
pub mod pipeline;

// Re-export commonly used types
pub use transaction::{EnrichedTransaction, Transaction, ENRICHED_COLUMNS, TRANSACTION_COLUMNS};
pub use parser::{parse_line, parse_transactions, LineDefect};
pub use validation::{
    apply_filters, validate, validate_and_filter,
    FilterCriteria, FilterOptions, FilterOutcome, FilterSummary,
};
pub use analytics::{
    calculate_total_revenue, customer_analysis, daily_sales_trend, find_peak_sales_day,
    low_performing_products, product_summary, region_wise_sales, top_selling_products,
    AnalyticsEngine, CustomerStats, DailyStats, PeakDay, ProductStats, RegionStats, SalesAnalytics,
};
pub use catalog::{
    create_product_mapping, fetch_all_products,
    FileCatalog, ProductCatalog, ProductInfo, ProductMapping, ProductRecord, StaticCatalog,
};
#[cfg(feature = "catalog-http")]
pub use catalog::HttpCatalog;
pub use enrichment::{catalog_key, enrich_sales_data, enrich_transaction, EnrichmentStats};
pub use report::{format_currency, render_analysis, render_report};
pub use files::{load_enriched_data, read_sales_data, save_clean_data, save_enriched_data, save_report};
pub use config::{CatalogSource, Cli, PipelineConfig};
pub use error::{OutputFailure, PipelineError};
pub use pipeline::{run, FilterMode, PipelineOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
