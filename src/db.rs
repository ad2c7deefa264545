//! Defines traits for setting up the application's database and the
//! function that runs the schema creation at startup.

use rusqlite::{Connection, Row, Transaction as SqlTransaction};

use crate::{Error, stores::SQLiteTransactionStore};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create the table for the model if it does not already exist.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a concrete Rust type.
pub trait MapRow {
    /// The type that the row maps to.
    type ReturnType;

    /// Convert `row` into [Self::ReturnType], reading columns from the start
    /// of the row.
    ///
    /// # Errors
    /// Returns an error if a column contains an unexpected type or is missing.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert `row` into [Self::ReturnType], reading columns starting at `offset`.
    ///
    /// # Errors
    /// Returns an error if a column contains an unexpected type or is missing.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Create the application tables in the database if they do not exist.
///
/// Safe to call on every startup.
///
/// # Errors
/// Returns an [Error::SqlError] if the schema could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    SQLiteTransactionStore::create_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
