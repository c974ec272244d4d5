// 🔗 Enrichment - join transactions against the product catalog
//
// Total and order-preserving: one enriched row per input row, never a drop.

use crate::catalog::ProductMapping;
use crate::transaction::{EnrichedTransaction, Transaction};
use serde::Serialize;

/// Numeric catalog key for a product id.
///
/// Every `P`/`p` is removed (not just a leading one) and the rest parsed as
/// an integer, so `P014` → 14. Anything non-numeric yields `None`, which
/// matches no catalog entry.
pub fn catalog_key(product_id: &str) -> Option<i64> {
    product_id
        .to_uppercase()
        .replace('P', "")
        .trim()
        .parse::<i64>()
        .ok()
}

pub fn enrich_transaction(tx: &Transaction, mapping: &ProductMapping) -> EnrichedTransaction {
    match catalog_key(&tx.product_id).and_then(|id| mapping.get(&id)) {
        Some(info) => EnrichedTransaction {
            transaction: tx.clone(),
            api_category: info.category.clone(),
            api_brand: info.brand.clone(),
            api_rating: info.rating,
            api_match: true,
        },
        None => EnrichedTransaction::unmatched(tx.clone()),
    }
}

pub fn enrich_sales_data(transactions: &[Transaction], mapping: &ProductMapping) -> Vec<EnrichedTransaction> {
    transactions
        .iter()
        .map(|tx| enrich_transaction(tx, mapping))
        .collect()
}

// ============================================================================
// COVERAGE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichmentStats {
    pub total: usize,
    pub matched: usize,
    /// Percentage 0-100; 0 when nothing was enriched
    pub success_rate: f64,
    /// Distinct unmatched product names, first-seen order
    pub unmatched_products: Vec<String>,
}

impl EnrichmentStats {
    pub fn from_enriched(enriched: &[EnrichedTransaction]) -> Self {
        let total = enriched.len();
        let matched = enriched.iter().filter(|e| e.api_match).count();
        let success_rate = if total > 0 {
            matched as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        let mut unmatched_products: Vec<String> = Vec::new();
        for e in enriched.iter().filter(|e| !e.api_match) {
            let name = &e.transaction.product_name;
            if !unmatched_products.contains(name) {
                unmatched_products.push(name.clone());
            }
        }

        EnrichmentStats {
            total,
            matched,
            success_rate,
            unmatched_products,
        }
    }

    /// At most `limit` unmatched names for display
    pub fn unmatched_sample(&self, limit: usize) -> &[String] {
        &self.unmatched_products[..self.unmatched_products.len().min(limit)]
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{create_product_mapping, ProductRecord};

    fn create_test_transaction(id: &str, product_id: &str, product_name: &str) -> Transaction {
        Transaction {
            transaction_id: id.to_string(),
            date: "2024-12-01".to_string(),
            product_id: product_id.to_string(),
            product_name: product_name.to_string(),
            quantity: 1,
            unit_price: 10.0,
            customer_id: "C001".to_string(),
            region: "North".to_string(),
        }
    }

    fn test_mapping() -> ProductMapping {
        create_product_mapping(&[
            ProductRecord {
                id: Some(14),
                title: Some("iPhone 9".to_string()),
                category: Some("smartphones".to_string()),
                brand: Some("Apple".to_string()),
                rating: Some(4.69),
            },
            ProductRecord {
                id: Some(101),
                title: Some("Laptop".to_string()),
                category: Some("laptops".to_string()),
                brand: None,
                rating: Some(4.1),
            },
        ])
    }

    #[test]
    fn test_catalog_key() {
        assert_eq!(catalog_key("P014"), Some(14));
        assert_eq!(catalog_key("p7"), Some(7));
        assert_eq!(catalog_key("P101"), Some(101));
        assert_eq!(catalog_key("PABC"), None);
        assert_eq!(catalog_key("P"), None);
    }

    #[test]
    fn test_catalog_key_strips_every_p() {
        // Internal P's vanish too: "P1P2" → "12"
        assert_eq!(catalog_key("P1P2"), Some(12));
        assert_eq!(catalog_key("PP5"), Some(5));
    }

    #[test]
    fn test_enrich_match() {
        let tx = create_test_transaction("T1", "P014", "Phone");
        let enriched = enrich_transaction(&tx, &test_mapping());

        assert!(enriched.api_match);
        assert_eq!(enriched.api_category.as_deref(), Some("smartphones"));
        assert_eq!(enriched.api_brand.as_deref(), Some("Apple"));
        assert_eq!(enriched.api_rating, Some(4.69));
        assert_eq!(enriched.transaction, tx);
    }

    #[test]
    fn test_enrich_match_with_missing_brand() {
        let tx = create_test_transaction("T1", "P101", "Laptop");
        let enriched = enrich_transaction(&tx, &test_mapping());

        assert!(enriched.api_match);
        assert!(enriched.api_brand.is_none());
    }

    #[test]
    fn test_enrich_is_total_and_ordered() {
        let txs = vec![
            create_test_transaction("T1", "P014", "Phone"),
            create_test_transaction("T2", "P999", "Unknown Thing"),
            create_test_transaction("T3", "PXYZ", "Weird Id"),
        ];

        let enriched = enrich_sales_data(&txs, &test_mapping());

        assert_eq!(enriched.len(), txs.len());
        let ids: Vec<&str> = enriched
            .iter()
            .map(|e| e.transaction.transaction_id.as_str())
            .collect();
        assert_eq!(ids, vec!["T1", "T2", "T3"]);
        assert!(enriched[0].api_match);
        assert!(!enriched[1].api_match);
        assert!(!enriched[2].api_match);
        assert!(enriched[1].api_category.is_none());
    }

    #[test]
    fn test_empty_mapping_matches_nothing() {
        let txs = vec![
            create_test_transaction("T1", "P014", "Phone"),
            create_test_transaction("T2", "P101", "Laptop"),
        ];

        let enriched = enrich_sales_data(&txs, &ProductMapping::new());

        assert!(enriched.iter().all(|e| !e.api_match && e.api_category.is_none()));
    }

    #[test]
    fn test_enrichment_stats() {
        let txs = vec![
            create_test_transaction("T1", "P014", "Phone"),
            create_test_transaction("T2", "P999", "Widget"),
            create_test_transaction("T3", "P998", "Gadget"),
            create_test_transaction("T4", "P997", "Widget"),
        ];

        let stats = EnrichmentStats::from_enriched(&enrich_sales_data(&txs, &test_mapping()));

        assert_eq!(stats.total, 4);
        assert_eq!(stats.matched, 1);
        assert_eq!(stats.success_rate, 25.0);
        assert_eq!(stats.unmatched_products, vec!["Widget".to_string(), "Gadget".to_string()]);
        assert_eq!(stats.unmatched_sample(1), &["Widget".to_string()]);
    }

    #[test]
    fn test_enrichment_stats_empty() {
        let stats = EnrichmentStats::from_enriched(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.success_rate, 0.0);
        assert!(stats.unmatched_sample(5).is_empty());
    }
}
