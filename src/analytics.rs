// 📊 Analytics Engine - descriptive sales aggregates
//
// Every function is pure over the transaction slice. Groupings keep
// first-seen order internally and are then stable-sorted, so ties always
// resolve to insertion order.

use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_LOW_THRESHOLD: i64 = 10;

// ============================================================================
// RESULT TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStats {
    pub region: String,
    pub total_sales: f64,
    pub transaction_count: usize,
    /// Share of total revenue, 0-100, rounded to 2 dp
    pub percentage: f64,
}

impl RegionStats {
    pub fn average_transaction_value(&self) -> f64 {
        if self.transaction_count == 0 {
            0.0
        } else {
            self.total_sales / self.transaction_count as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductStats {
    pub product_name: String,
    pub quantity: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerStats {
    pub customer_id: String,
    pub total_spent: f64,
    pub purchase_count: usize,
    /// Distinct product names, sorted
    pub products_bought: Vec<String>,
    pub avg_order_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: String,
    pub revenue: f64,
    pub transaction_count: usize,
    pub unique_customers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakDay {
    pub date: String,
    pub revenue: f64,
    pub transaction_count: usize,
}

// ============================================================================
// AGGREGATES
// ============================================================================

pub fn calculate_total_revenue(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(Transaction::amount).sum()
}

/// Per-region totals, sorted by total sales descending
pub fn region_wise_sales(transactions: &[Transaction]) -> Vec<RegionStats> {
    let total_revenue = calculate_total_revenue(transactions);

    let groups = group_in_order(
        transactions,
        |tx| &tx.region,
        |acc: &mut (f64, usize), tx| {
            acc.0 += tx.amount();
            acc.1 += 1;
        },
    );

    let mut stats: Vec<RegionStats> = groups
        .into_iter()
        .map(|(region, (total_sales, transaction_count))| RegionStats {
            region,
            total_sales,
            transaction_count,
            percentage: if total_revenue > 0.0 {
                round2(total_sales / total_revenue * 100.0)
            } else {
                0.0
            },
        })
        .collect();

    stats.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));
    stats
}

/// Per-product quantity and revenue, in first-seen order
pub fn product_summary(transactions: &[Transaction]) -> Vec<ProductStats> {
    group_in_order(
        transactions,
        |tx| &tx.product_name,
        |acc: &mut (i64, f64), tx| {
            // Huge quantities pin at i64::MAX instead of wrapping negative
            acc.0 = acc.0.saturating_add(tx.quantity);
            acc.1 += tx.amount();
        },
    )
    .into_iter()
    .map(|(product_name, (quantity, revenue))| ProductStats {
        product_name,
        quantity,
        revenue,
    })
    .collect()
}

/// Top `n` products by quantity sold (not revenue)
pub fn top_selling_products(transactions: &[Transaction], n: usize) -> Vec<ProductStats> {
    let mut products = product_summary(transactions);
    products.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    products.truncate(n);
    products
}

/// Per-customer spend, sorted by total spent descending
pub fn customer_analysis(transactions: &[Transaction]) -> Vec<CustomerStats> {
    let groups = group_in_order(
        transactions,
        |tx| &tx.customer_id,
        |acc: &mut (f64, usize, BTreeSet<String>), tx| {
            acc.0 += tx.amount();
            acc.1 += 1;
            acc.2.insert(tx.product_name.clone());
        },
    );

    let mut stats: Vec<CustomerStats> = groups
        .into_iter()
        .map(|(customer_id, (total_spent, purchase_count, products))| CustomerStats {
            customer_id,
            total_spent,
            purchase_count,
            products_bought: products.into_iter().collect(),
            avg_order_value: if purchase_count > 0 {
                round2(total_spent / purchase_count as f64)
            } else {
                0.0
            },
        })
        .collect();

    stats.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
    stats
}

/// Per-date revenue and activity, ascending by the date string.
/// Ordering is lexical, so dates must already be `YYYY-MM-DD`.
pub fn daily_sales_trend(transactions: &[Transaction]) -> Vec<DailyStats> {
    let mut by_date: BTreeMap<&str, (f64, usize, BTreeSet<&str>)> = BTreeMap::new();

    for tx in transactions {
        let entry = by_date.entry(tx.date.as_str()).or_default();
        entry.0 += tx.amount();
        entry.1 += 1;
        entry.2.insert(tx.customer_id.as_str());
    }

    by_date
        .into_iter()
        .map(|(date, (revenue, transaction_count, customers))| DailyStats {
            date: date.to_string(),
            revenue,
            transaction_count,
            unique_customers: customers.len(),
        })
        .collect()
}

/// Highest-revenue day; the earliest date wins a tie
pub fn find_peak_sales_day(transactions: &[Transaction]) -> Option<PeakDay> {
    let mut peak: Option<DailyStats> = None;

    for day in daily_sales_trend(transactions) {
        // Strictly greater, so an equal later day never displaces the earlier one
        let better = peak.as_ref().map_or(true, |best| day.revenue > best.revenue);
        if better {
            peak = Some(day);
        }
    }

    peak.map(|day| PeakDay {
        date: day.date,
        revenue: day.revenue,
        transaction_count: day.transaction_count,
    })
}

/// Products whose total quantity is strictly below `threshold`, ascending by quantity
pub fn low_performing_products(transactions: &[Transaction], threshold: i64) -> Vec<ProductStats> {
    let mut low: Vec<ProductStats> = product_summary(transactions)
        .into_iter()
        .filter(|p| p.quantity < threshold)
        .collect();
    low.sort_by_key(|p| p.quantity);
    low
}

// ============================================================================
// ANALYTICS ENGINE
// ============================================================================

/// Everything the report needs, computed in one pass over the stages above
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesAnalytics {
    pub total_revenue: f64,
    pub transaction_count: usize,
    pub average_order_value: f64,
    /// (first, last) date string, `None` for an empty set
    pub date_range: Option<(String, String)>,
    pub regions: Vec<RegionStats>,
    pub top_products: Vec<ProductStats>,
    pub customers: Vec<CustomerStats>,
    pub daily: Vec<DailyStats>,
    pub peak_day: Option<PeakDay>,
    pub low_performers: Vec<ProductStats>,
}

pub struct AnalyticsEngine {
    /// How many products make the top list (default: 5)
    pub top_n: usize,

    /// Quantity below which a product is a low performer (default: 10)
    pub low_threshold: i64,
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        AnalyticsEngine {
            top_n: DEFAULT_TOP_N,
            low_threshold: DEFAULT_LOW_THRESHOLD,
        }
    }

    pub fn with_limits(top_n: usize, low_threshold: i64) -> Self {
        AnalyticsEngine {
            top_n,
            low_threshold,
        }
    }

    pub fn analyze(&self, transactions: &[Transaction]) -> SalesAnalytics {
        let total_revenue = calculate_total_revenue(transactions);
        let transaction_count = transactions.len();
        let average_order_value = if transaction_count > 0 {
            total_revenue / transaction_count as f64
        } else {
            0.0
        };

        let date_range = transactions
            .iter()
            .map(|tx| tx.date.as_str())
            .min()
            .zip(transactions.iter().map(|tx| tx.date.as_str()).max())
            .map(|(first, last)| (first.to_string(), last.to_string()));

        SalesAnalytics {
            total_revenue,
            transaction_count,
            average_order_value,
            date_range,
            regions: region_wise_sales(transactions),
            top_products: top_selling_products(transactions, self.top_n),
            customers: customer_analysis(transactions),
            daily: daily_sales_trend(transactions),
            peak_day: find_peak_sales_day(transactions),
            low_performers: low_performing_products(transactions, self.low_threshold),
        }
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Round to 2 decimal places, exact halves to even (0.125 → 0.12)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Fold transactions into per-key accumulators, keeping first-seen key order
fn group_in_order<A, K, F>(transactions: &[Transaction], key: K, mut fold: F) -> Vec<(String, A)>
where
    A: Default,
    K: Fn(&Transaction) -> &String,
    F: FnMut(&mut A, &Transaction),
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, A)> = Vec::new();

    for tx in transactions {
        let k = key(tx);
        let slot = *index.entry(k.as_str()).or_insert_with(|| {
            groups.push((k.clone(), A::default()));
            groups.len() - 1
        });
        fold(&mut groups[slot].1, tx);
    }

    groups
}

// ============================================================================
// TESTS
// ============================================================================
