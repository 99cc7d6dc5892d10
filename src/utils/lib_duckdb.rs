use std::{fs, path::Path};

use duckdb::{AccessMode, Config, Connection};

/// Open the DuckDB file for writing, creating it and its parent directory if
/// needed.  Also return `true` if the file did not exist before.
pub fn open_or_create(duckdb_path: &str) -> Result<(Connection, bool), crate::error::LoadError> {
    let path = Path::new(duckdb_path);
    let created = !path.exists();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let conn = Connection::open(path)?;
    Ok((conn, created))
}

/// Use this function for the queries that don't modify the database.
pub fn open_read_only(duckdb_path: &str) -> Result<Connection, duckdb::Error> {
    let config = Config::default().access_mode(AccessMode::ReadOnly)?;
    Connection::open_with_flags(duckdb_path, config)
}
