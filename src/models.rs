//! The value types exchanged over the API and persisted to storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::database_id::TransactionId;

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened.
    pub date: NaiveDate,
    /// A short label grouping related transactions, e.g. "Groceries".
    pub category: String,
    /// Free-text detail of what the transaction was for.
    pub description: Option<String>,
    /// Classifies the transaction, e.g. as income or an expense.
    #[serde(rename = "type")]
    pub kind: String,
}

/// The client payload for creating or updating a [Transaction].
///
/// Clients may send an `id` field but it is never honored; storage assigns
/// the real ID on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionBuilder {
    /// Ignored on create and update.
    #[serde(default)]
    pub id: TransactionId,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// When the transaction happened.
    pub date: NaiveDate,
    /// A short label grouping related transactions.
    pub category: String,
    /// Free-text detail of what the transaction was for.
    #[serde(default)]
    pub description: Option<String>,
    /// Classifies the transaction, e.g. as income or an expense.
    #[serde(rename = "type")]
    pub kind: String,
}

impl TransactionBuilder {
    /// Convert the builder into a [Transaction] with the storage-assigned `id`.
    pub fn finalise(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            date: self.date,
            category: self.category,
            description: self.description,
            kind: self.kind,
        }
    }
}

/// The aggregate of the stored transactions that share a category.
///
/// Summaries have no persistent identity, they are recomputed on every
/// request from the rows currently in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The category the totals are for.
    pub category: String,
    /// The sum of [Transaction::amount] over the category.
    pub total_amount: f64,
    /// The number of transactions in the category.
    pub total_transactions: i64,
}
