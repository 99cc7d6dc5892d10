// Monthly COE bidding results published on data.gov.sg
// https://data.gov.sg/datasets/d_69b3380ad7e51aff3a7dcc84eba52b8a/view

use log::info;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::ExtractionError;

/// One month and vehicle class, as returned by the API.  The measures come
/// as strings most of the time, so they are kept untyped until coercion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawAuctionRow {
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub vehicle_class: String,
    #[serde(default)]
    pub quota: Value,
    #[serde(default)]
    pub bids_success: Value,
    #[serde(default)]
    pub bids_received: Value,
    #[serde(default)]
    pub premium: Value,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    result: Option<ResultBlock>,
}

#[derive(Debug, Deserialize)]
struct ResultBlock {
    records: Option<Vec<RawAuctionRow>>,
}

pub struct CoeResultsArchive {
    pub base_dir: String,
    pub url: String,
    pub resource_id: String,
    pub limit: usize,
    pub api_key: String,
}

impl CoeResultsArchive {
    /// Where the last API response is kept
    pub fn filename(&self) -> String {
        self.base_dir.to_owned() + "/Raw/coe_results.json"
    }

    /// Get all the records from the API.  The response body is saved to disk
    /// before it gets parsed.
    pub fn download_records(&self) -> Result<Vec<RawAuctionRow>, ExtractionError> {
        let client = Client::new();
        let response = client
            .get(&self.url)
            .header("x-api-key", &self.api_key)
            .query(&[
                ("resource_id", self.resource_id.clone()),
                ("limit", self.limit.to_string()),
            ])
            .send()?;
        if !response.status().is_success() {
            return Err(ExtractionError::Status(response.status().as_u16()));
        }
        let body = response.text()?;

        let path = self.filename();
        if let Some(dir) = Path::new(&path).parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, &body)?;

        let rows = parse_response(&body)?;
        info!("API data extraction successful, {} records", rows.len());
        Ok(rows)
    }
}

/// Parse the `datastore_search` envelope.  A response without the success
/// flag or without a `records` array is an error.
pub fn parse_response(body: &str) -> Result<Vec<RawAuctionRow>, ExtractionError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if !envelope.success {
        return Err(ExtractionError::Api("success flag is not set".to_string()));
    }
    envelope
        .result
        .and_then(|r| r.records)
        .ok_or_else(|| ExtractionError::Api("no records in the response".to_string()))
}
