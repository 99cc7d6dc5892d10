use std::io;

use thiserror::Error;

/// Failures while pulling data from the API or the CEVS bands document.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("API call failed or returned no records: {0}")]
    Api(String),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse pdf: {0}")]
    Pdf(#[from] lopdf::Error),
}

#[derive(Error, Debug)]
pub enum TransformationError {
    #[error("no car reference data to transform")]
    MissingCarReference,
    #[error("vehicle class {0} has no category id")]
    UnknownVehicleClass(String),
    #[error("month {0} is not of the form YYYY-MM")]
    UnmappedMonth(String),
}

/// Failures while provisioning the warehouse or appending rows to it.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("duckdb error: {0}")]
    DuckDb(#[from] duckdb::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("extraction failed, {0}")]
    Extraction(#[from] ExtractionError),
    #[error("transformation failed, {0}")]
    Transformation(#[from] TransformationError),
    #[error("loading failed, {0}")]
    Load(#[from] LoadError),
}
