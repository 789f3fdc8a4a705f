//! Ledger source connectors
//!
//! The ledger arrives as one rectangular CSV table, fetched over HTTP or
//! read from a local file. Headers are validated before any row is
//! deserialized so a missing column fails with its name instead of a
//! row-level parse error.

use async_trait::async_trait;
use salesdash_core::config::SourceConfig;
use salesdash_core::{
    retry_with_backoff, DashboardError, RetryPolicy, Transaction, REQUIRED_COLUMNS,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// A table-shaped source the ledger can be read from
#[async_trait]
pub trait DataSource: Send + Sync + std::fmt::Debug {
    /// Read the full transaction table
    async fn read(&self) -> Result<Vec<Transaction>, DashboardError>;
}

/// Parse a ledger CSV, validating headers before rows
///
/// # Errors
///
/// - `MissingColumn` when a required header is absent
/// - `Source` when a row fails to deserialize (the message names the line)
/// - `Validation` when a row carries a negative or non-finite revenue
pub fn parse_ledger_csv(data: &[u8]) -> Result<Vec<Transaction>, DashboardError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| DashboardError::source(format!("failed to read CSV headers: {}", e)))?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(DashboardError::missing_column(column));
        }
    }

    let mut transactions = Vec::new();
    for (index, result) in reader.deserialize::<Transaction>().enumerate() {
        // +2: one for the header line, one for 1-based numbering
        let row = result
            .map_err(|e| DashboardError::source(format!("malformed row {}: {}", index + 2, e)))?;
        row.validate()?;
        transactions.push(row);
    }

    Ok(transactions)
}

/// HTTP CSV source with retry on transient failures
#[derive(Debug)]
pub struct HttpCsvSource {
    client: reqwest::Client,
    url: String,
    retry: RetryPolicy,
}

impl HttpCsvSource {
    /// Create a source fetching `url` with the given request timeout
    pub fn new(url: impl Into<String>, fetch_timeout: Duration) -> Result<Self, DashboardError> {
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .map_err(|e| DashboardError::source(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            retry: RetryPolicy::default(),
        })
    }

    /// Replace the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn fetch(&self) -> Result<Vec<u8>, DashboardError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DashboardError::source(format!("fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DashboardError::source(format!(
                "source returned HTTP {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DashboardError::source(format!("failed to read response body: {}", e)))?;

        Ok(body.to_vec())
    }
}

#[async_trait]
impl DataSource for HttpCsvSource {
    async fn read(&self) -> Result<Vec<Transaction>, DashboardError> {
        tracing::debug!(url = %self.url, "fetching ledger");

        let body = retry_with_backoff(
            || self.fetch(),
            self.retry.clone(),
            |err: &DashboardError| matches!(err, DashboardError::Source { .. }),
        )
        .await?;

        parse_ledger_csv(&body)
    }
}

/// Local CSV file source, used by tests and offline runs
#[derive(Debug)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    /// Create a source reading from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for CsvFileSource {
    async fn read(&self) -> Result<Vec<Transaction>, DashboardError> {
        let data = tokio::fs::read(&self.path).await.map_err(|e| {
            DashboardError::source(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        parse_ledger_csv(&data)
    }
}

/// Build the configured source, preferring a local path over a URL
///
/// # Errors
///
/// Returns a `ConfigurationError` when neither a path nor a URL is set.
pub fn from_config(config: &SourceConfig) -> Result<Arc<dyn DataSource>, DashboardError> {
    if let Some(ref path) = config.path {
        return Ok(Arc::new(CsvFileSource::new(path.clone())));
    }

    if let Some(ref url) = config.url {
        return Ok(Arc::new(HttpCsvSource::new(
            url.clone(),
            config.fetch_timeout,
        )?));
    }

    Err(DashboardError::ConfigurationError {
        message: "no ledger source configured".to_string(),
        key: Some("SALESDASH_SOURCE_URL".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "CLIENTE,PRODUTO,TIPO DE PRODUTO,SEGMENTO,MERCADO,UF,PAÍS,MUNICÍPIO,CONTINENTE,ICMS,ORIGEM DO PRODUTO,DATA,FATURAMENTO,QUANTIDADE,ABC CLIENTE,ABC PRODUTO,MÊS";

    fn ledger_csv(rows: &[&str]) -> Vec<u8> {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.into_bytes()
    }

    #[test]
    fn test_parse_well_formed_ledger() {
        let data = ledger_csv(&[
            "ACME,CAIXA 30L,CAIXA,VAREJO,INTERNO,SP,BRASIL,CAMPINAS,AMÉRICA DO SUL,DENTRO DO ESTADO,NACIONAL,2024-03-15,1250.5,10,A,B,Março",
        ]);

        let rows = parse_ledger_csv(&data).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].client, "ACME");
        assert_eq!(rows[0].revenue, Some(1250.5));
        assert_eq!(rows[0].quantity, 10);
    }

    #[test]
    fn test_empty_revenue_cell_parses_to_none() {
        let data = ledger_csv(&[
            "ACME,CAIXA 30L,CAIXA,VAREJO,INTERNO,SP,BRASIL,CAMPINAS,AMÉRICA DO SUL,DENTRO DO ESTADO,NACIONAL,2024-03-15,,10,A,B,Março",
        ]);

        let rows = parse_ledger_csv(&data).unwrap();
        assert_eq!(rows[0].revenue, None);
    }

    #[test]
    fn test_missing_column_names_the_column() {
        let data = b"CLIENTE,PRODUTO\nACME,CAIXA".to_vec();

        let err = parse_ledger_csv(&data).unwrap_err();
        match err {
            DashboardError::MissingColumn { column } => {
                assert_eq!(column, "TIPO DE PRODUTO");
            }
            other => panic!("expected MissingColumn, got {other}"),
        }
    }

    #[test]
    fn test_malformed_row_names_the_line() {
        let data = ledger_csv(&[
            "ACME,CAIXA 30L,CAIXA,VAREJO,INTERNO,SP,BRASIL,CAMPINAS,AMÉRICA DO SUL,DENTRO DO ESTADO,NACIONAL,not-a-date,10.0,10,A,B,Março",
        ]);

        let err = parse_ledger_csv(&data).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_negative_revenue_is_rejected() {
        let data = ledger_csv(&[
            "ACME,CAIXA 30L,CAIXA,VAREJO,INTERNO,SP,BRASIL,CAMPINAS,AMÉRICA DO SUL,DENTRO DO ESTADO,NACIONAL,2024-03-15,-5.0,10,A,B,Março",
        ]);

        let err = parse_ledger_csv(&data).unwrap_err();
        assert!(matches!(err, DashboardError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_file_source_reads_ledger() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&ledger_csv(&[
            "ACME,CAIXA 30L,CAIXA,VAREJO,INTERNO,SP,BRASIL,CAMPINAS,AMÉRICA DO SUL,DENTRO DO ESTADO,NACIONAL,2024-03-15,1250.5,10,A,B,Março",
        ]))
        .unwrap();

        let source = CsvFileSource::new(file.path());
        let rows = source.read().await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_file_source_missing_file_is_source_error() {
        let source = CsvFileSource::new("/nonexistent/ledger.csv");
        let err = source.read().await.unwrap_err();
        assert!(matches!(err, DashboardError::Source { .. }));
    }

    #[test]
    fn test_from_config_prefers_path() {
        let config = SourceConfig {
            url: Some("https://example.com/ledger.csv".to_string()),
            path: Some(PathBuf::from("/data/ledger.csv")),
            ..SourceConfig::default()
        };

        // Path wins; building must not require a network client
        assert!(from_config(&config).is_ok());
    }

    #[test]
    fn test_from_config_without_source_fails() {
        let config = SourceConfig::default();
        assert!(matches!(
            from_config(&config).unwrap_err(),
            DashboardError::ConfigurationError { .. }
        ));
    }
}
