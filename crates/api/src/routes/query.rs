//! Filter query parameters
//!
//! Categorical selections arrive as comma-separated lists so they fit
//! in ordinary query strings; dates use `%Y-%m-%d`.

use chrono::NaiveDate;
use salesdash_core::DashboardError;
use salesdash_engine::TransactionFilter;
use serde::Deserialize;

/// Query-string form of [`TransactionFilter`]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FilterQuery {
    /// Minimum revenue, inclusive
    pub min_revenue: Option<f64>,
    /// Maximum revenue, inclusive
    pub max_revenue: Option<f64>,
    /// Earliest sale date, inclusive
    pub start_date: Option<NaiveDate>,
    /// Latest sale date, inclusive
    pub end_date: Option<NaiveDate>,
    /// Comma-separated client labels
    pub clients: Option<String>,
    /// Comma-separated product labels
    pub products: Option<String>,
    /// Comma-separated product types
    pub product_types: Option<String>,
    /// Comma-separated segments
    pub segments: Option<String>,
    /// Comma-separated markets
    pub markets: Option<String>,
    /// Comma-separated states
    pub states: Option<String>,
    /// Comma-separated countries
    pub countries: Option<String>,
    /// Comma-separated municipalities
    pub municipalities: Option<String>,
    /// Comma-separated continents
    pub continents: Option<String>,
    /// Comma-separated tax zones
    pub tax_zones: Option<String>,
    /// Comma-separated product origins
    pub product_origins: Option<String>,
}

impl FilterQuery {
    /// Convert into a validated [`TransactionFilter`]
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error when a minimum exceeds its maximum.
    pub fn into_filter(self) -> Result<TransactionFilter, DashboardError> {
        let filter = TransactionFilter {
            min_revenue: self.min_revenue,
            max_revenue: self.max_revenue,
            start_date: self.start_date,
            end_date: self.end_date,
            clients: csv_list(self.clients),
            products: csv_list(self.products),
            product_types: csv_list(self.product_types),
            segments: csv_list(self.segments),
            markets: csv_list(self.markets),
            states: csv_list(self.states),
            countries: csv_list(self.countries),
            municipalities: csv_list(self.municipalities),
            continents: csv_list(self.continents),
            tax_zones: csv_list(self.tax_zones),
            product_origins: csv_list(self.product_origins),
        };

        filter.validate()?;
        Ok(filter)
    }
}

fn csv_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_lists_split_and_trim() {
        let query = FilterQuery {
            clients: Some("ACME, GLOBEX ,,INITECH".to_string()),
            ..FilterQuery::default()
        };

        let filter = query.into_filter().unwrap();
        assert_eq!(filter.clients, vec!["ACME", "GLOBEX", "INITECH"]);
    }

    #[test]
    fn test_empty_query_is_passthrough_filter() {
        let filter = FilterQuery::default().into_filter().unwrap();
        assert!(filter.clients.is_empty());
        assert!(filter.min_revenue.is_none());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let query = FilterQuery {
            min_revenue: Some(100.0),
            max_revenue: Some(1.0),
            ..FilterQuery::default()
        };

        assert!(query.into_filter().is_err());
    }
}
