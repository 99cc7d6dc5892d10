use log::{error, info};

use crate::config::EtlConfig;
use crate::db::lta::coe_results_archive::RawAuctionRow;
use crate::db::prod_db::ProdDb;
use crate::db::reports::{
    average_premium_by_category, premium_table, recommendation_table, recommended_car_models,
};
use crate::db::warehouse::{LoadSummary, Warehouse};
use crate::error::{EtlError, ExtractionError, LoadError, TransformationError};
use crate::parse::records::CarRecord;
use crate::transform::car::{transform_car_data, CarReference};
use crate::transform::coe::{transform_coe_data, CoeTables};
use crate::utils::lib_duckdb::open_read_only;

/// Pull the auction results from the API, then the car models from the pdf.
pub fn extract(config: &EtlConfig) -> Result<(Vec<RawAuctionRow>, Vec<CarRecord>), ExtractionError> {
    let coe = ProdDb::coe_results(config).download_records()?;
    let cars = ProdDb::cevs_bands(config).get_car_records()?;
    Ok((coe, cars))
}

pub fn transform(
    coe: Vec<RawAuctionRow>,
    cars: Option<Vec<CarRecord>>,
) -> Result<(CoeTables, Vec<CarReference>), TransformationError> {
    let tables = transform_coe_data(coe)?;
    let cars = transform_car_data(cars)?;
    Ok((tables, cars))
}

/// Provision the warehouse and append the tables.  The connection is closed
/// before returning.
pub fn load(
    warehouse: &Warehouse,
    tables: &CoeTables,
    cars: &[CarReference],
) -> Result<LoadSummary, LoadError> {
    let mut conn = warehouse.create_database_and_tables()?;
    let summary = warehouse.load_data(&mut conn, tables, cars)?;
    drop(conn);
    Ok(summary)
}

/// Transform and load already extracted data.
pub fn transform_and_load(
    warehouse: &Warehouse,
    coe: Vec<RawAuctionRow>,
    cars: Option<Vec<CarRecord>>,
) -> Result<LoadSummary, EtlError> {
    let (tables, cars) = transform(coe, cars).inspect_err(|e| {
        error!("ETL pipeline aborted due to transformation errors: {}", e);
    })?;
    let summary = load(warehouse, &tables, &cars).inspect_err(|e| {
        error!("ETL pipeline aborted due to loading errors: {}", e);
    })?;
    Ok(summary)
}

/// Run the whole job: extract, transform, load.  Stops at the first stage
/// that fails, nothing is retried.
pub fn run_etl_pipeline(config: &EtlConfig) -> Result<LoadSummary, EtlError> {
    info!("Starting COE data ETL pipeline");
    let (coe, cars) = extract(config).inspect_err(|e| {
        error!("ETL pipeline aborted due to extraction errors: {}", e);
    })?;
    let summary = transform_and_load(&ProdDb::coe_warehouse(config), coe, Some(cars))?;
    info!("ETL pipeline completed successfully!");
    Ok(summary)
}

/// Print the two sample queries.
pub fn run_sample_queries(duckdb_path: &str) -> Result<(), duckdb::Error> {
    info!("Running sample queries");
    let conn = open_read_only(duckdb_path)?;
    let premiums = average_premium_by_category(&conn)?;
    println!("\nAverage Monthly Premium by Category:");
    println!("{}", premium_table(&premiums));

    let cars = recommended_car_models(&conn)?;
    println!("\nRecommended Car Models (Category A, Bands A1 & A2):");
    println!("{}", recommendation_table(&cars));
    Ok(())
}
