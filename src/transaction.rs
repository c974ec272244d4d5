// 🧾 Transaction Model
// Fixed-schema sales records: the parsed transaction and its enriched form

use serde::{Deserialize, Serialize};

/// Column order of the raw input file and of the clean CSV export
pub const TRANSACTION_COLUMNS: [&str; 8] = [
    "TransactionID",
    "Date",
    "ProductID",
    "ProductName",
    "Quantity",
    "UnitPrice",
    "CustomerID",
    "Region",
];

/// Column order of the enriched pipe export
pub const ENRICHED_COLUMNS: [&str; 12] = [
    "TransactionID",
    "Date",
    "ProductID",
    "ProductName",
    "Quantity",
    "UnitPrice",
    "CustomerID",
    "Region",
    "API_Category",
    "API_Brand",
    "API_Rating",
    "API_Match",
];

// ============================================================================
// TRANSACTION
// ============================================================================

/// One sales line as parsed from the log.
/// Never mutated after parsing; the amount is derived on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "TransactionID")]
    pub transaction_id: String,

    /// ISO-like `YYYY-MM-DD`, kept as a string because it is only a sort/group key
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "ProductID")]
    pub product_id: String,

    #[serde(rename = "ProductName")]
    pub product_name: String,

    #[serde(rename = "Quantity")]
    pub quantity: i64,

    #[serde(rename = "UnitPrice")]
    pub unit_price: f64,

    #[serde(rename = "CustomerID")]
    pub customer_id: String,

    #[serde(rename = "Region")]
    pub region: String,
}

impl Transaction {
    /// Amount = Quantity × UnitPrice
    pub fn amount(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }

    /// Structural validity: positive quantity and price, correct id prefixes,
    /// non-blank region
    pub fn is_valid(&self) -> bool {
        self.quantity > 0
            && self.unit_price > 0.0
            && self.transaction_id.starts_with('T')
            && self.product_id.starts_with('P')
            && self.customer_id.starts_with('C')
            && !self.region.trim().is_empty()
    }
}

// ============================================================================
// ENRICHED TRANSACTION
// ============================================================================

/// A transaction joined against the product catalog.
/// The `api_*` fields stay `None` when the lookup missed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,

    #[serde(rename = "API_Category")]
    pub api_category: Option<String>,

    #[serde(rename = "API_Brand")]
    pub api_brand: Option<String>,

    #[serde(rename = "API_Rating")]
    pub api_rating: Option<f64>,

    #[serde(rename = "API_Match")]
    pub api_match: bool,
}

impl EnrichedTransaction {
    /// Wrap a transaction with no catalog data attached
    pub fn unmatched(transaction: Transaction) -> Self {
        EnrichedTransaction {
            transaction,
            api_category: None,
            api_brand: None,
            api_rating: None,
            api_match: false,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_transaction(quantity: i64, unit_price: f64) -> Transaction {
        Transaction {
            transaction_id: "T001".to_string(),
            date: "2024-12-01".to_string(),
            product_id: "P101".to_string(),
            product_name: "Laptop".to_string(),
            quantity,
            unit_price,
            customer_id: "C001".to_string(),
            region: "North".to_string(),
        }
    }

    #[test]
    fn test_amount_is_quantity_times_price() {
        let tx = create_test_transaction(3, 12.5);
        assert_eq!(tx.amount(), 37.5);
    }

    #[test]
    fn test_valid_transaction() {
        assert!(create_test_transaction(1, 0.01).is_valid());
    }

    #[test]
    fn test_zero_quantity_or_price_is_invalid() {
        assert!(!create_test_transaction(0, 10.0).is_valid());
        assert!(!create_test_transaction(2, 0.0).is_valid());
        assert!(!create_test_transaction(-1, 10.0).is_valid());
    }

    #[test]
    fn test_prefixes_and_region() {
        let mut tx = create_test_transaction(1, 1.0);
        tx.transaction_id = "X001".to_string();
        assert!(!tx.is_valid());

        let mut tx = create_test_transaction(1, 1.0);
        tx.product_id = "101".to_string();
        assert!(!tx.is_valid());

        let mut tx = create_test_transaction(1, 1.0);
        tx.customer_id = "c001".to_string();
        assert!(!tx.is_valid());

        let mut tx = create_test_transaction(1, 1.0);
        tx.region = "   ".to_string();
        assert!(!tx.is_valid());
    }

    #[test]
    fn test_unmatched_enrichment_has_no_catalog_fields() {
        let enriched = EnrichedTransaction::unmatched(create_test_transaction(1, 1.0));
        assert!(!enriched.api_match);
        assert!(enriched.api_category.is_none());
        assert!(enriched.api_brand.is_none());
        assert!(enriched.api_rating.is_none());
    }
}
