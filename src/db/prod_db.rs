use crate::config::{EtlConfig, API_URL, PDF_FILENAME, PDF_URL, RECORD_LIMIT, RESOURCE_ID};

use super::{
    lta::coe_results_archive::CoeResultsArchive, nccs::cevs_bands_archive::CevsBandsArchive,
    warehouse::Warehouse,
};

pub struct ProdDb {}

impl ProdDb {
    pub fn coe_results(config: &EtlConfig) -> CoeResultsArchive {
        CoeResultsArchive {
            base_dir: config.base_dir.clone(),
            url: API_URL.to_string(),
            resource_id: RESOURCE_ID.to_string(),
            limit: RECORD_LIMIT,
            api_key: config.api_key.clone(),
        }
    }

    pub fn cevs_bands(config: &EtlConfig) -> CevsBandsArchive {
        CevsBandsArchive {
            base_dir: config.base_dir.clone(),
            url: PDF_URL.to_string(),
            filename: PDF_FILENAME.to_string(),
        }
    }

    pub fn coe_warehouse(config: &EtlConfig) -> Warehouse {
        Warehouse {
            duckdb_path: config.duckdb_path.clone(),
            schema_path: config.schema_path.clone(),
        }
    }
}
