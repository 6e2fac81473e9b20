//! Database schema definition
//!
//! This module contains the SQL schema for the EO-Archive database.

/// SQL schema for the database
///
/// A single relation; creation is idempotent so a pre-existing table is
/// left untouched.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS executive_orders (
    id INTEGER PRIMARY KEY,
    title TEXT,
    date TEXT,
    content TEXT,
    url TEXT
);

CREATE INDEX IF NOT EXISTS idx_executive_orders_url ON executive_orders(url);
CREATE INDEX IF NOT EXISTS idx_executive_orders_title ON executive_orders(title);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
