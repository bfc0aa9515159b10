use std::time::Duration;

use contracts::system::credentials::{CredentialTable, HqCredential, OutletCredential};
use thiserror::Error;

use crate::shared::config::SheetsConfig;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("sheet request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sheet responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("sheet CSV is malformed: {0}")]
    Csv(#[from] csv::Error),
}

/// Downloads the credential tabs of the spreadsheet as CSV
#[derive(Clone)]
pub struct SheetClient {
    http: reqwest::Client,
    outlet_url: String,
    hq_url: String,
}

impl SheetClient {
    pub fn new(config: &SheetsConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            outlet_url: config.outlet_url(),
            hq_url: config.hq_url(),
        })
    }

    async fn fetch_csv(&self, url: &str) -> Result<String, SheetError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SheetError::Status(response.status()));
        }
        Ok(response.text().await?)
    }

    /// Fetch both tabs; either tab failing fails the whole load
    pub async fn fetch_table(&self) -> Result<CredentialTable, SheetError> {
        let (outlet_csv, hq_csv) =
            tokio::try_join!(self.fetch_csv(&self.outlet_url), self.fetch_csv(&self.hq_url))?;

        let table = CredentialTable {
            outlet: parse_outlet_csv(&outlet_csv)?,
            hq: parse_hq_csv(&hq_csv)?,
        };

        tracing::info!(
            "Loaded {} outlet and {} HQ credentials from sheet",
            table.outlet.len(),
            table.hq.len()
        );
        Ok(table)
    }
}

/// Split CSV text into rows of trimmed cells, skipping the header row
fn read_rows(text: &str) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect()
}

pub fn parse_outlet_csv(text: &str) -> Result<Vec<OutletCredential>, csv::Error> {
    Ok(read_rows(text)?
        .iter()
        .filter_map(|row| OutletCredential::from_columns(row))
        .collect())
}

pub fn parse_hq_csv(text: &str) -> Result<Vec<HqCredential>, csv::Error> {
    Ok(read_rows(text)?
        .iter()
        .filter_map(|row| HqCredential::from_columns(row))
        .collect())
}
