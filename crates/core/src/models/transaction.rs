//! Transaction row model for the sales ledger
//!
//! One row per sale. The schema is fixed and validated once at
//! ingestion; downstream code works with named fields rather than
//! string-keyed column lookups. Serde renames map the fields onto the
//! ledger's CSV headers.

use crate::error::DashboardError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column headers the source table must provide, in ledger order.
pub const REQUIRED_COLUMNS: [&str; 17] = [
    "CLIENTE",
    "PRODUTO",
    "TIPO DE PRODUTO",
    "SEGMENTO",
    "MERCADO",
    "UF",
    "PAÍS",
    "MUNICÍPIO",
    "CONTINENTE",
    "ICMS",
    "ORIGEM DO PRODUTO",
    "DATA",
    "FATURAMENTO",
    "QUANTIDADE",
    "ABC CLIENTE",
    "ABC PRODUTO",
    "MÊS",
];

/// One sale in the ledger
///
/// Client and product labels are the stable human-readable identifiers;
/// the engine maps them to dense indices per snapshot. `revenue` is
/// `None` when the source cell is empty, and such rows are excluded
/// from revenue sums rather than treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Client label
    #[serde(rename = "CLIENTE")]
    pub client: String,

    /// Product label
    #[serde(rename = "PRODUTO")]
    pub product: String,

    /// Product type
    #[serde(rename = "TIPO DE PRODUTO")]
    pub product_type: String,

    /// Market segment
    #[serde(rename = "SEGMENTO")]
    pub segment: String,

    /// Market (domestic/export grouping)
    #[serde(rename = "MERCADO")]
    pub market: String,

    /// State (UF)
    #[serde(rename = "UF")]
    pub state: String,

    /// Country
    #[serde(rename = "PAÍS")]
    pub country: String,

    /// Municipality
    #[serde(rename = "MUNICÍPIO")]
    pub municipality: String,

    /// Continent
    #[serde(rename = "CONTINENTE")]
    pub continent: String,

    /// Tax-zone flag (in-state / out-of-state)
    #[serde(rename = "ICMS")]
    pub tax_zone: String,

    /// Product origin
    #[serde(rename = "ORIGEM DO PRODUTO")]
    pub product_origin: String,

    /// Sale date (%Y-%m-%d)
    #[serde(rename = "DATA")]
    pub date: NaiveDate,

    /// Revenue for this sale; `None` when the source cell is empty
    #[serde(rename = "FATURAMENTO")]
    pub revenue: Option<f64>,

    /// Quantity sold
    #[serde(rename = "QUANTIDADE")]
    pub quantity: u64,

    /// ABC classification of the client
    #[serde(rename = "ABC CLIENTE")]
    pub abc_client: String,

    /// ABC classification of the product
    #[serde(rename = "ABC PRODUTO")]
    pub abc_product: String,

    /// Month label used for monthly groupings
    #[serde(rename = "MÊS")]
    pub month: String,
}

impl Transaction {
    /// Validate row-level constraints that the type system cannot express
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error when a recorded revenue is negative
    /// or not a finite number.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if let Some(revenue) = self.revenue {
            if !revenue.is_finite() {
                return Err(DashboardError::validation(
                    "revenue must be a finite number",
                    "FATURAMENTO",
                ));
            }
            if revenue < 0.0 {
                return Err(DashboardError::validation(
                    format!("revenue must be non-negative, got {}", revenue),
                    "FATURAMENTO",
                ));
            }
        }
        Ok(())
    }
}
