//! Contains the trait and implementation for objects that store the domain
//! [models](crate::models).

pub mod sqlite;

pub use sqlite::SQLiteTransactionStore;

use crate::{
    Error,
    database_id::TransactionId,
    models::{CategorySummary, Transaction, TransactionBuilder},
};

/// Handles the persistence of transactions.
///
/// Implementers own the SQL statement text and the mapping from storage rows
/// back to [Transaction] values.
pub trait TransactionStore {
    /// Insert a new transaction into the store.
    ///
    /// Any ID the client supplied in `builder` is ignored; the store assigns
    /// the next one.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve the transaction with `id` from the store.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve all transactions in storage-native order.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Overwrite all mutable fields of the transaction with `id`.
    fn update(&mut self, id: TransactionId, builder: TransactionBuilder) -> Result<(), Error>;

    /// Remove the transaction with `id` from the store.
    fn delete(&mut self, id: TransactionId) -> Result<(), Error>;

    /// Compute the per-category totals of the transactions currently in the
    /// store.
    ///
    /// Categories with no rows never appear in the result.
    fn summarize(&self) -> Result<Vec<CategorySummary>, Error>;
}
