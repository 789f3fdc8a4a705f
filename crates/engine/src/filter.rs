//! Filtered views of the transaction table
//!
//! The filter layer produces a subset of the same table shape; nothing
//! downstream changes. Range bounds are inclusive and an empty
//! categorical selection leaves that dimension unfiltered.

use chrono::NaiveDate;
use salesdash_core::{DashboardError, Transaction};
use serde::Deserialize;

/// Filter over the transaction table
///
/// Revenue bounds apply to recorded revenue only: when either bound is
/// set, rows without a recorded revenue are excluded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransactionFilter {
    /// Minimum revenue, inclusive
    pub min_revenue: Option<f64>,
    /// Maximum revenue, inclusive
    pub max_revenue: Option<f64>,
    /// Earliest sale date, inclusive
    pub start_date: Option<NaiveDate>,
    /// Latest sale date, inclusive
    pub end_date: Option<NaiveDate>,
    /// Client labels to keep; empty keeps all
    pub clients: Vec<String>,
    /// Product labels to keep; empty keeps all
    pub products: Vec<String>,
    /// Product types to keep; empty keeps all
    pub product_types: Vec<String>,
    /// Segments to keep; empty keeps all
    pub segments: Vec<String>,
    /// Markets to keep; empty keeps all
    pub markets: Vec<String>,
    /// States to keep; empty keeps all
    pub states: Vec<String>,
    /// Countries to keep; empty keeps all
    pub countries: Vec<String>,
    /// Municipalities to keep; empty keeps all
    pub municipalities: Vec<String>,
    /// Continents to keep; empty keeps all
    pub continents: Vec<String>,
    /// Tax zones to keep; empty keeps all
    pub tax_zones: Vec<String>,
    /// Product origins to keep; empty keeps all
    pub product_origins: Vec<String>,
}

impl TransactionFilter {
    /// Check the filter's internal consistency
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error when a minimum exceeds its maximum.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if let (Some(min), Some(max)) = (self.min_revenue, self.max_revenue) {
            if min > max {
                return Err(DashboardError::validation(
                    "minimum revenue must not exceed maximum revenue",
                    "min_revenue",
                ));
            }
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(DashboardError::validation(
                    "start date must not be after end date",
                    "start_date",
                ));
            }
        }

        Ok(())
    }

    /// Whether `transaction` passes every active criterion
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if self.min_revenue.is_some() || self.max_revenue.is_some() {
            match transaction.revenue {
                None => return false,
                Some(revenue) => {
                    if let Some(min) = self.min_revenue {
                        if revenue < min {
                            return false;
                        }
                    }
                    if let Some(max) = self.max_revenue {
                        if revenue > max {
                            return false;
                        }
                    }
                }
            }
        }

        if let Some(start) = self.start_date {
            if transaction.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if transaction.date > end {
                return false;
            }
        }

        selected(&self.clients, &transaction.client)
            && selected(&self.products, &transaction.product)
            && selected(&self.product_types, &transaction.product_type)
            && selected(&self.segments, &transaction.segment)
            && selected(&self.markets, &transaction.market)
            && selected(&self.states, &transaction.state)
            && selected(&self.countries, &transaction.country)
            && selected(&self.municipalities, &transaction.municipality)
            && selected(&self.continents, &transaction.continent)
            && selected(&self.tax_zones, &transaction.tax_zone)
            && selected(&self.product_origins, &transaction.product_origin)
    }

    /// Filtered copy of the table, same shape as the input
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}

fn selected(selection: &[String], value: &str) -> bool {
    selection.is_empty() || selection.iter().any(|candidate| candidate == value)
}
