use std::env;

use crate::error::EtlError;

pub const API_URL: &str = "https://data.gov.sg/api/action/datastore_search";
pub const RESOURCE_ID: &str = "d_69b3380ad7e51aff3a7dcc84eba52b8a";
pub const RECORD_LIMIT: usize = 5000;
pub const PDF_URL: &str = "https://www.nccs.gov.sg/files/docs/default-source/news-documents/cevs_revised_bands_eg_car_models_annex_a.pdf";
pub const PDF_FILENAME: &str = "cevs_revised_bands.pdf";
pub const DB_NAME: &str = "COE";

/// Settings for one pipeline run.  Built once and handed to each component.
#[derive(Debug, Clone, PartialEq)]
pub struct EtlConfig {
    pub api_key: String,
    /// Directory where the downloaded files are kept
    pub base_dir: String,
    pub duckdb_path: String,
    pub schema_path: String,
}

impl EtlConfig {
    /// Read the configuration from the process environment.  Only `API_KEY`
    /// is required, the paths fall back to the `./data` directory.
    pub fn from_env() -> Result<EtlConfig, EtlError> {
        let api_key = env::var("API_KEY")
            .map_err(|_| EtlError::Config("API_KEY is not set".to_string()))?;
        let base_dir = env::var("COE_BASE_DIR").unwrap_or_else(|_| "./data".to_string());
        Ok(EtlConfig {
            api_key,
            duckdb_path: env::var("COE_DUCKDB_PATH")
                .unwrap_or_else(|_| format!("{}/{}.duckdb", base_dir, DB_NAME)),
            schema_path: env::var("COE_SCHEMA_PATH")
                .unwrap_or_else(|_| "sql/schema.sql".to_string()),
            base_dir,
        })
    }

    pub fn new(api_key: &str, base_dir: &str) -> EtlConfig {
        EtlConfig {
            api_key: api_key.to_string(),
            base_dir: base_dir.to_string(),
            duckdb_path: format!("{}/{}.duckdb", base_dir, DB_NAME),
            schema_path: "sql/schema.sql".to_string(),
        }
    }
}
