//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row};

use crate::{
    AppState, Error,
    database_id::TransactionId,
    db::{CreateTable, MapRow, initialize},
    models::{CategorySummary, Transaction, TransactionBuilder},
    stores::TransactionStore,
};

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SqlAppState = AppState<SQLiteTransactionStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the table for the
/// transaction model.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(db_connection: Connection) -> Result<SqlAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));
    let transaction_store = SQLiteTransactionStore::new(connection);

    Ok(AppState::new(transaction_store))
}

/// Stores transactions in a SQLite database.
///
/// The connection is shared across all clones of the store; each operation
/// acquires it for the duration of a single statement.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Insert a new transaction in the database.
    ///
    /// Any ID in `builder` is ignored, the database assigns the next one.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if the insert cannot be
    /// completed.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let transaction = self
            .lock_connection()?
            .prepare(
                "INSERT INTO \"transaction\" (amount, date, category, description, type)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, amount, date, category, description, type",
            )?
            .query_row(
                (
                    builder.amount,
                    builder.date,
                    builder.category,
                    builder.description,
                    builder.kind,
                ),
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock_connection()?
            .prepare(
                "SELECT id, amount, date, category, description, type
                 FROM \"transaction\" WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(transaction)
    }

    /// Retrieve all transactions in the database, in storage-native order.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.lock_connection()?
            .prepare("SELECT id, amount, date, category, description, type FROM \"transaction\"")?
            .query_map([], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Overwrite all mutable fields of the transaction with `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid
    ///   transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&mut self, id: TransactionId, builder: TransactionBuilder) -> Result<(), Error> {
        let rows_affected = self.lock_connection()?.execute(
            "UPDATE \"transaction\"
             SET amount = ?1, date = ?2, category = ?3, description = ?4, type = ?5
             WHERE id = ?6",
            (
                builder.amount,
                builder.date,
                builder.category,
                builder.description,
                builder.kind,
                id,
            ),
        )?;

        match rows_affected {
            0 => Err(Error::UpdateMissingTransaction),
            _ => Ok(()),
        }
    }

    /// Remove the transaction with `id` from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid
    ///   transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: TransactionId) -> Result<(), Error> {
        let rows_affected = self
            .lock_connection()?
            .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

        match rows_affected {
            0 => Err(Error::DeleteMissingTransaction),
            _ => Ok(()),
        }
    }

    /// Compute the per-category sum and count of the stored transactions.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn summarize(&self) -> Result<Vec<CategorySummary>, Error> {
        self.lock_connection()?
            .prepare(
                "SELECT category, SUM(amount) AS total_amount, COUNT(*) AS total_transactions
                 FROM \"transaction\"
                 GROUP BY category",
            )?
            .query_map([], |row| {
                Ok(CategorySummary {
                    category: row.get(0)?,
                    total_amount: row.get(1)?,
                    total_transactions: row.get(2)?,
                })
            })?
            .map(|maybe_summary| maybe_summary.map_err(Error::from))
            .collect()
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    amount NUMERIC(10, 2) NOT NULL,
                    date DATE NOT NULL,
                    category VARCHAR(255) NOT NULL,
                    description TEXT,
                    type VARCHAR(50) NOT NULL
                    )",
            (),
        )?;

        // Ensure the sequence starts at 1
        connection.execute(
            "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let amount = row.get(offset + 1)?;
        let date = row.get(offset + 2)?;
        let category = row.get(offset + 3)?;
        let description = row.get(offset + 4)?;
        let kind = row.get(offset + 5)?;

        Ok(Transaction {
            id,
            amount,
            date,
            category,
            description,
            kind,
        })
    }
}
