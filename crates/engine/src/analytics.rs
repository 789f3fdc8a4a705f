//! Aggregate series for the dashboard charts
//!
//! Pure transforms from a transaction slice to labelled series; the
//! charting layer consumes these and renders them, nothing is drawn
//! here. Rows without a recorded revenue contribute nothing to revenue
//! sums.

use salesdash_core::Transaction;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One labelled point in a chart series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Category label
    pub label: String,
    /// Aggregated value
    pub value: f64,
}

/// One point on an ABC curve, sorted by revenue descending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbcPoint {
    /// Client or product label
    pub label: String,
    /// ABC classification carried from the ledger (first occurrence wins)
    pub class: String,
    /// Summed revenue for this label
    pub revenue: f64,
    /// Running total up to and including this label
    pub cumulative_revenue: f64,
}

/// Sum of recorded revenue over the slice
pub fn revenue_total(transactions: &[Transaction]) -> f64 {
    transactions.iter().filter_map(|t| t.revenue).sum()
}

/// ABC curve over clients: revenue per client, cumulative, best first
pub fn abc_curve_by_client(transactions: &[Transaction]) -> Vec<AbcPoint> {
    abc_curve(transactions, |t| (t.client.as_str(), t.abc_client.as_str()))
}

/// ABC curve over products: revenue per product, cumulative, best first
pub fn abc_curve_by_product(transactions: &[Transaction]) -> Vec<AbcPoint> {
    abc_curve(transactions, |t| (t.product.as_str(), t.abc_product.as_str()))
}

fn abc_curve<'a>(
    transactions: &'a [Transaction],
    key: impl Fn(&'a Transaction) -> (&'a str, &'a str),
) -> Vec<AbcPoint> {
    let mut totals: HashMap<&str, (f64, &str)> = HashMap::new();

    for transaction in transactions {
        let (label, class) = key(transaction);
        let entry = totals.entry(label).or_insert((0.0, class));
        if let Some(revenue) = transaction.revenue {
            entry.0 += revenue;
        }
    }

    let mut points: Vec<AbcPoint> = totals
        .into_iter()
        .map(|(label, (revenue, class))| AbcPoint {
            label: label.to_string(),
            class: class.to_string(),
            revenue,
            cumulative_revenue: 0.0,
        })
        .collect();

    points.sort_by(|a, b| descending_then_label(a.revenue, b.revenue, &a.label, &b.label));

    let mut running = 0.0;
    for point in &mut points {
        running += point.revenue;
        point.cumulative_revenue = running;
    }

    points
}

/// Top `n` clients by summed revenue
pub fn top_clients_by_revenue(transactions: &[Transaction], n: usize) -> Vec<SeriesPoint> {
    let mut points = sum_by(transactions, |t| t.client.as_str(), |t| t.revenue.unwrap_or(0.0));
    points.truncate(n);
    points
}

/// Top `n` products by summed quantity
pub fn top_products_by_quantity(transactions: &[Transaction], n: usize) -> Vec<SeriesPoint> {
    let mut points = sum_by(transactions, |t| t.product.as_str(), |t| t.quantity as f64);
    points.truncate(n);
    points
}

/// Revenue share per market
pub fn revenue_share_by_market(transactions: &[Transaction]) -> Vec<SeriesPoint> {
    sum_by(transactions, |t| t.market.as_str(), |t| t.revenue.unwrap_or(0.0))
}

/// Revenue share per state
pub fn revenue_share_by_state(transactions: &[Transaction]) -> Vec<SeriesPoint> {
    sum_by(transactions, |t| t.state.as_str(), |t| t.revenue.unwrap_or(0.0))
}

/// Revenue per month label, preserving the ledger's month order
pub fn revenue_by_month(transactions: &[Transaction]) -> Vec<SeriesPoint> {
    by_month(transactions, |t| t.revenue.unwrap_or(0.0))
}

/// Quantity per month label, preserving the ledger's month order
pub fn quantity_by_month(transactions: &[Transaction]) -> Vec<SeriesPoint> {
    by_month(transactions, |t| t.quantity as f64)
}

/// Individual sales sorted by revenue descending, truncated to `n`
///
/// Rows without a recorded revenue are omitted.
pub fn top_revenue_rows(transactions: &[Transaction], n: usize) -> Vec<SeriesPoint> {
    let mut rows: Vec<SeriesPoint> = transactions
        .iter()
        .filter_map(|t| {
            t.revenue.map(|revenue| SeriesPoint {
                label: t.client.clone(),
                value: revenue,
            })
        })
        .collect();

    rows.sort_by(|a, b| descending_then_label(a.value, b.value, &a.label, &b.label));
    rows.truncate(n);
    rows
}

fn sum_by<'a>(
    transactions: &'a [Transaction],
    key: impl Fn(&'a Transaction) -> &'a str,
    value: impl Fn(&Transaction) -> f64,
) -> Vec<SeriesPoint> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions {
        *totals.entry(key(transaction)).or_insert(0.0) += value(transaction);
    }

    let mut points: Vec<SeriesPoint> = totals
        .into_iter()
        .map(|(label, value)| SeriesPoint {
            label: label.to_string(),
            value,
        })
        .collect();

    points.sort_by(|a, b| descending_then_label(a.value, b.value, &a.label, &b.label));
    points
}

// Month labels keep first-occurrence order: the ledger already lists
// months chronologically, and alphabetical month names would shuffle them.
fn by_month(transactions: &[Transaction], value: impl Fn(&Transaction) -> f64) -> Vec<SeriesPoint> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions {
        let month = transaction.month.as_str();
        if !totals.contains_key(month) {
            order.push(month);
        }
        *totals.entry(month).or_insert(0.0) += value(transaction);
    }

    order
        .into_iter()
        .map(|label| SeriesPoint {
            label: label.to_string(),
            value: totals[label],
        })
        .collect()
}

fn descending_then_label(a: f64, b: f64, a_label: &str, b_label: &str) -> Ordering {
    b.partial_cmp(&a)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a_label.cmp(b_label))
}
