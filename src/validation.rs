// ✅ Validation & Filtering
// Structural validity first, then optional user criteria over the valid pool.
//
// Both stages are pure: they take records by reference and return new vectors.

use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

// ============================================================================
// FILTER CRITERIA
// ============================================================================

/// Optional narrowing applied after validation.
/// Every field is independent; `None` (or an empty region) disables it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact, case-sensitive region match
    pub region: Option<String>,

    /// Inclusive lower bound on Amount
    pub min_amount: Option<f64>,

    /// Inclusive upper bound on Amount
    pub max_amount: Option<f64>,
}

impl FilterCriteria {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    pub fn with_min_amount(mut self, min: f64) -> Self {
        self.min_amount = Some(min);
        self
    }

    pub fn with_max_amount(mut self, max: f64) -> Self {
        self.max_amount = Some(max);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.active_region().is_none() && self.min_amount.is_none() && self.max_amount.is_none()
    }

    fn active_region(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty())
    }

    fn rejects_region(&self, tx: &Transaction) -> bool {
        self.active_region().is_some_and(|region| tx.region != region)
    }

    fn rejects_amount(&self, tx: &Transaction) -> bool {
        let amount = tx.amount();
        self.min_amount.is_some_and(|min| amount < min)
            || self.max_amount.is_some_and(|max| amount > max)
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub total_input: usize,
    pub invalid: usize,
    pub filtered_by_region: usize,
    pub filtered_by_amount: usize,
    pub final_count: usize,
}

impl FilterSummary {
    pub fn filtered_out(&self) -> usize {
        self.filtered_by_region + self.filtered_by_amount
    }

    pub fn summary(&self) -> String {
        format!(
            "{} input, {} invalid, {} filtered by region, {} filtered by amount, {} kept",
            self.total_input,
            self.invalid,
            self.filtered_by_region,
            self.filtered_by_amount,
            self.final_count
        )
    }
}

/// Result of the combined validate + filter stage
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub transactions: Vec<Transaction>,
    pub summary: FilterSummary,
}

// ============================================================================
// STAGES
// ============================================================================

/// Split records into the valid pool and an invalid count
pub fn validate(transactions: &[Transaction]) -> (Vec<Transaction>, usize) {
    let valid: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| tx.is_valid())
        .cloned()
        .collect();
    let invalid = transactions.len() - valid.len();

    (valid, invalid)
}

/// Apply criteria to an already-valid pool.
///
/// Returns the kept records plus `(filtered_by_region, filtered_by_amount)`.
/// The region check runs first, so a record failing both counts once, under
/// region.
pub fn apply_filters(
    valid: &[Transaction],
    criteria: &FilterCriteria,
) -> (Vec<Transaction>, usize, usize) {
    let mut kept = Vec::with_capacity(valid.len());
    let mut by_region = 0;
    let mut by_amount = 0;

    for tx in valid {
        if criteria.rejects_region(tx) {
            by_region += 1;
            continue;
        }
        if criteria.rejects_amount(tx) {
            by_amount += 1;
            continue;
        }
        kept.push(tx.clone());
    }

    (kept, by_region, by_amount)
}

/// Validate, then filter, and account for every dropped record
pub fn validate_and_filter(transactions: &[Transaction], criteria: &FilterCriteria) -> FilterOutcome {
    let (valid, invalid) = validate(transactions);
    let (kept, filtered_by_region, filtered_by_amount) = apply_filters(&valid, criteria);

    let summary = FilterSummary {
        total_input: transactions.len(),
        invalid,
        filtered_by_region,
        filtered_by_amount,
        final_count: kept.len(),
    };
    log::debug!("validation: {}", summary.summary());

    FilterOutcome {
        transactions: kept,
        summary,
    }
}

// ============================================================================
// FILTER OPTIONS (shown before prompting)
// ============================================================================

/// What the user can filter on, computed from the parsed records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub min_amount: f64,
    pub max_amount: f64,
}

impl FilterOptions {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut regions: Vec<String> = transactions
            .iter()
            .filter(|tx| !tx.region.is_empty())
            .map(|tx| tx.region.clone())
            .collect();
        regions.sort();
        regions.dedup();

        let amounts = transactions.iter().map(Transaction::amount);
        let min_amount = amounts.clone().reduce(f64::min).unwrap_or(0.0);
        let max_amount = amounts.reduce(f64::max).unwrap_or(0.0);

        FilterOptions {
            regions,
            min_amount,
            max_amount,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
