use std::fs;

use duckdb::{params, Connection};
use log::info;

use crate::config::DB_NAME;
use crate::error::LoadError;
use crate::transform::car::CarReference;
use crate::transform::coe::CoeTables;
use crate::utils::lib_duckdb::open_or_create;

/// The DuckDB star schema with the COE results and the car reference.
pub struct Warehouse {
    pub duckdb_path: String,
    pub schema_path: String,
}

/// Number of rows appended to each table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub date_dim: usize,
    pub category_dim: usize,
    pub car_reference: usize,
    pub fact_coe_monthly: usize,
}

pub const TABLES: [&str; 4] = ["date_dim", "category_dim", "car_reference", "fact_coe_monthly"];

impl Warehouse {
    /// Create the database file if it doesn't exist, then run the schema
    /// script in one transaction.  Return the open connection.
    pub fn create_database_and_tables(&self) -> Result<Connection, LoadError> {
        let (mut conn, created) = open_or_create(&self.duckdb_path)?;
        if created {
            info!("Database '{}' created at {}", DB_NAME, self.duckdb_path);
        } else {
            info!("Database '{}' already exists at {}", DB_NAME, self.duckdb_path);
        }

        let sql = fs::read_to_string(&self.schema_path)?;
        let tx = conn.transaction()?;
        for statement in split_statements(&sql) {
            tx.execute_batch(statement)?;
        }
        tx.commit()?;
        info!("Tables created successfully from {}", self.schema_path);
        Ok(conn)
    }

    /// Append the four tables, dimensions first.  Existing rows are left
    /// alone, so loading the same data twice doubles every table.  Either all
    /// the rows make it in or none do.
    pub fn load_data(
        &self,
        conn: &mut Connection,
        tables: &CoeTables,
        cars: &[CarReference],
    ) -> Result<LoadSummary, LoadError> {
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare("INSERT INTO date_dim VALUES (?, ?, ?, ?);")?;
            for d in &tables.date_dim {
                stmt.execute(params![d.date_id, d.year, d.month, d.quarter])?;
            }

            let mut stmt = tx.prepare("INSERT INTO category_dim VALUES (?, ?, ?);")?;
            for c in &tables.category_dim {
                stmt.execute(params![c.category_id, c.category_code, c.description])?;
            }

            let mut stmt = tx.prepare("INSERT INTO car_reference VALUES (?, ?, ?, ?);")?;
            for car in cars {
                stmt.execute(params![
                    car.car_id,
                    car.band.map(|b| b.as_str()),
                    car.car_model,
                    car.category_id
                ])?;
            }

            let mut stmt =
                tx.prepare("INSERT INTO fact_coe_monthly VALUES (?, ?, ?, ?, ?, ?, ?);")?;
            for f in &tables.fact {
                stmt.execute(params![
                    f.fact_id,
                    f.date_id,
                    f.category_id,
                    f.monthly_quota,
                    f.bids_success_monthly,
                    f.bids_received_monthly,
                    f.average_premium_monthly
                ])?;
            }
        }
        tx.commit()?;

        let summary = LoadSummary {
            date_dim: tables.date_dim.len(),
            category_dim: tables.category_dim.len(),
            car_reference: cars.len(),
            fact_coe_monthly: tables.fact.len(),
        };
        info!("Data loaded into database tables successfully, {:?}", summary);
        Ok(summary)
    }
}

/// Split the schema script on `;`.  Whatever follows the last `;` is
/// ignored, and so are blank statements.  A `;` inside a string literal or a
/// comment will break this.
pub fn split_statements(sql: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = sql.split(';').collect();
    parts.pop();
    parts.into_iter().filter(|s| !s.trim().is_empty()).collect()
}

/// Row count of each warehouse table.
pub fn row_counts(conn: &Connection) -> Result<Vec<(String, i64)>, duckdb::Error> {
    TABLES
        .iter()
        .map(|table| {
            let n: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {};", table), [], |row| row.get(0))?;
            Ok((table.to_string(), n))
        })
        .collect()
}
