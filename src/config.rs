// ⚙️ Configuration - command line → resolved pipeline settings
//
// Only the binary parses argv; the library works from PipelineConfig.

use crate::analytics::{DEFAULT_LOW_THRESHOLD, DEFAULT_TOP_N};
use crate::catalog::{FileCatalog, ProductCatalog, StaticCatalog, DEFAULT_CATALOG_URL};
use crate::validation::FilterCriteria;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "sales-analytics", version, about = "Sales transaction cleaning, enrichment and reporting")]
pub struct Cli {
    /// Pipe-delimited sales log (first line is a header)
    #[arg(long, env = "SALES_INPUT", default_value = "data/sales_data.txt")]
    pub input: PathBuf,

    /// Text report destination
    #[arg(long, env = "SALES_REPORT", default_value = "output/sales_report.txt")]
    pub report: PathBuf,

    /// CSV export of the valid transactions
    #[arg(long, env = "SALES_CLEAN_DATA", default_value = "output/cleaned_sales_data.csv")]
    pub clean_data: PathBuf,

    /// Pipe-delimited export of the enriched transactions
    #[arg(long, env = "SALES_ENRICHED", default_value = "data/enriched_sales_data.txt")]
    pub enriched: PathBuf,

    /// Product catalog endpoint
    #[arg(long, env = "SALES_CATALOG_URL", default_value = DEFAULT_CATALOG_URL)]
    pub catalog_url: String,

    /// Read the catalog from a JSON snapshot instead of the network
    #[arg(long, env = "SALES_CATALOG_FILE", conflicts_with = "offline")]
    pub catalog_file: Option<PathBuf>,

    /// Skip the catalog entirely (no enrichment)
    #[arg(long)]
    pub offline: bool,

    /// Catalog request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Keep only this region (exact match)
    #[arg(long)]
    pub region: Option<String>,

    /// Keep only amounts >= this value
    #[arg(long)]
    pub min_amount: Option<f64>,

    /// Keep only amounts <= this value
    #[arg(long)]
    pub max_amount: Option<f64>,

    /// Never ask for filter criteria
    #[arg(long)]
    pub no_prompt: bool,

    /// Rows in the top products / customers tables
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// Products selling fewer units than this are low performers
    #[arg(long, default_value_t = DEFAULT_LOW_THRESHOLD)]
    pub low_threshold: i64,

    /// -v for info, -vv for debug
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log level from -v flags; RUST_LOG still wins when set
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// Criteria given as flags
    pub fn filter_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            region: self.region.clone(),
            min_amount: self.min_amount,
            max_amount: self.max_amount,
        }
    }

    /// Whether the interactive prompt may run (the caller still checks for a terminal)
    pub fn wants_prompt(&self) -> bool {
        !self.no_prompt && self.region.is_none() && self.min_amount.is_none() && self.max_amount.is_none()
    }

    pub fn to_config(&self) -> PipelineConfig {
        let catalog = if self.offline {
            CatalogSource::Offline
        } else if let Some(path) = &self.catalog_file {
            CatalogSource::File(path.clone())
        } else {
            CatalogSource::Http {
                url: self.catalog_url.clone(),
                timeout: Duration::from_secs(self.timeout_secs),
            }
        };

        PipelineConfig {
            input: self.input.clone(),
            report: self.report.clone(),
            clean_data: self.clean_data.clone(),
            enriched: self.enriched.clone(),
            catalog,
            top_n: self.top,
            low_threshold: self.low_threshold,
        }
    }
}

// ============================================================================
// RESOLVED CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    Http { url: String, timeout: Duration },
    File(PathBuf),
    Offline,
}

impl CatalogSource {
    pub fn build(&self) -> Box<dyn ProductCatalog> {
        match self {
            #[cfg(feature = "catalog-http")]
            CatalogSource::Http { url, timeout } => {
                Box::new(crate::catalog::HttpCatalog::new(url).with_timeout(*timeout))
            }
            #[cfg(not(feature = "catalog-http"))]
            CatalogSource::Http { url, .. } => {
                log::warn!("built without catalog-http, not fetching {}", url);
                Box::new(StaticCatalog::empty())
            }
            CatalogSource::File(path) => Box::new(FileCatalog::new(path)),
            CatalogSource::Offline => Box::new(StaticCatalog::empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub report: PathBuf,
    pub clean_data: PathBuf,
    pub enriched: PathBuf,
    pub catalog: CatalogSource,
    pub top_n: usize,
    pub low_threshold: i64,
}

impl PipelineConfig {
    /// Defaults rooted at `dir` (handy for tests and sandboxed runs)
    pub fn in_dir(dir: &std::path::Path) -> Self {
        PipelineConfig {
            input: dir.join("data/sales_data.txt"),
            report: dir.join("output/sales_report.txt"),
            clean_data: dir.join("output/cleaned_sales_data.csv"),
            enriched: dir.join("data/enriched_sales_data.txt"),
            catalog: CatalogSource::Offline,
            top_n: DEFAULT_TOP_N,
            low_threshold: DEFAULT_LOW_THRESHOLD,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
