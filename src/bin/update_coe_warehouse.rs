use std::{path::Path, process::ExitCode};

use clap::Parser;
use coe_warehouse::{
    config::EtlConfig,
    pipeline::{run_etl_pipeline, run_sample_queries},
};
use log::{error, info, warn};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Environment name, e.g., test, prod
    #[arg(short, long, default_value = "prod")]
    env: String,

    /// Don't run the sample queries after loading
    #[arg(long, default_value_t = false)]
    skip_reports: bool,
}

/// Rebuild the COE star schema from the data.gov.sg results and the CEVS
/// bands document.  Every run appends, it does not replace.
fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let env_file = format!(".env/{}.env", args.env);
    if let Err(e) = dotenvy::from_path(Path::new(&env_file)) {
        warn!("Could not read {}: {}", env_file, e);
    }

    let config = match EtlConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run_etl_pipeline(&config) {
        Ok(summary) => info!("{:?}", summary),
        Err(_) => return ExitCode::FAILURE,
    }

    if !args.skip_reports {
        if let Err(e) = run_sample_queries(&config.duckdb_path) {
            error!("Error running sample queries: {}", e);
        }
    }

    ExitCode::SUCCESS
}
