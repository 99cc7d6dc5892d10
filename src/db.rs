pub mod lta {
    pub mod coe_results_archive;
}
pub mod nccs {
    pub mod cevs_bands_archive;
}
pub mod prod_db;
pub mod reports;
pub mod warehouse;
