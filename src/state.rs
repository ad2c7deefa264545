//! Implements a struct that holds the state of the REST server.

use crate::stores::TransactionStore;

/// The state of the REST server.
///
/// Cloning is cheap, the store shares its database connection internally.
#[derive(Debug, Clone)]
pub struct AppState<T>
where
    T: TransactionStore + Clone + Send + Sync,
{
    /// The store for managing transactions.
    pub transaction_store: T,
}

impl<T> AppState<T>
where
    T: TransactionStore + Clone + Send + Sync,
{
    /// Create a new [AppState] that serves transactions from `transaction_store`.
    pub fn new(transaction_store: T) -> Self {
        Self { transaction_store }
    }
}
