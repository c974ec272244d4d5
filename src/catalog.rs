// 🛒 Product Catalog - external product metadata
//
// The catalog is a one-shot key-value source: fetched once per run, turned
// into a ProductMapping, and never refreshed. A failing catalog never stops
// the pipeline; it degrades to an empty product list.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com/products?limit=100";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// CORE TYPES
// ============================================================================

/// One product as delivered by the catalog. Every field is optional on the
/// wire; records without an `id` cannot be joined and are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Response envelope: `{ "products": [...], "total": .., ... }`
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    products: Vec<ProductRecord>,
}

/// Catalog attributes attached to a matched transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub title: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub rating: Option<f64>,
}

/// Numeric product id → catalog attributes. Read-only once built.
pub type ProductMapping = HashMap<i64, ProductInfo>;

// ============================================================================
// CATALOG SOURCES
// ============================================================================

/// Anything that can hand over a product snapshot
pub trait ProductCatalog {
    /// Fetch the full product list in one blocking call
    fn fetch_products(&self) -> Result<Vec<ProductRecord>>;

    /// Short label for progress output
    fn describe(&self) -> String;
}

/// Remote JSON catalog over HTTP (blocking, fixed timeout, no retries)
#[cfg(feature = "catalog-http")]
pub struct HttpCatalog {
    pub url: String,
    pub timeout: Duration,
}

#[cfg(feature = "catalog-http")]
impl HttpCatalog {
    pub fn new(url: &str) -> Self {
        HttpCatalog {
            url: url.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(feature = "catalog-http")]
impl ProductCatalog for HttpCatalog {
    fn fetch_products(&self) -> Result<Vec<ProductRecord>> {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();

        // Non-2xx statuses come back as errors from call()
        let response: CatalogResponse = agent
            .get(&self.url)
            .call()
            .with_context(|| format!("Catalog request failed: {}", self.url))?
            .into_json()
            .with_context(|| format!("Catalog response is not valid JSON: {}", self.url))?;

        Ok(response.products)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Catalog snapshot saved to disk in the same shape as the HTTP response
pub struct FileCatalog {
    pub path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: &Path) -> Self {
        FileCatalog {
            path: path.to_path_buf(),
        }
    }
}

impl ProductCatalog for FileCatalog {
    fn fetch_products(&self) -> Result<Vec<ProductRecord>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open catalog file: {}", self.path.display()))?;

        let response: CatalogResponse = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse catalog JSON from {}", self.path.display()))?;

        Ok(response.products)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory catalog (tests, offline runs)
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<ProductRecord>,
}

impl StaticCatalog {
    pub fn new(products: Vec<ProductRecord>) -> Self {
        StaticCatalog { products }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl ProductCatalog for StaticCatalog {
    fn fetch_products(&self) -> Result<Vec<ProductRecord>> {
        Ok(self.products.clone())
    }

    fn describe(&self) -> String {
        format!("static catalog ({} products)", self.products.len())
    }
}

// ============================================================================
// FETCH + MAPPING
// ============================================================================

/// Fetch the snapshot, turning any failure into an empty list
pub fn fetch_all_products(catalog: &dyn ProductCatalog) -> Vec<ProductRecord> {
    log::info!("fetching products from {}", catalog.describe());

    match catalog.fetch_products() {
        Ok(products) => {
            log::info!("catalog returned {} products", products.len());
            products
        }
        Err(e) => {
            log::warn!("catalog unavailable, continuing without enrichment: {:#}", e);
            Vec::new()
        }
    }
}

/// Index products by id; records without an id are skipped, later
/// duplicates overwrite earlier ones
pub fn create_product_mapping(products: &[ProductRecord]) -> ProductMapping {
    products
        .iter()
        .filter_map(|p| {
            p.id.map(|id| {
                (
                    id,
                    ProductInfo {
                        title: p.title.clone(),
                        category: p.category.clone(),
                        brand: p.brand.clone(),
                        rating: p.rating,
                    },
                )
            })
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
