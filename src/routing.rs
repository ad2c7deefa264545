//! Application router configuration.

use axum::{Router, routing::get};

use crate::{
    AppState, endpoints,
    stores::TransactionStore,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
        get_transactions_endpoint, transaction_summary_endpoint, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    // The literal summary route must take precedence over the
    // `{transaction_id}` matcher, otherwise "summary" would be parsed as an
    // ID. Axum matches static segments before captures; a route test pins
    // this behavior.
    Router::new()
        .route(
            endpoints::TRANSACTION_SUMMARY,
            get(transaction_summary_endpoint::<T>),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint::<T>).post(create_transaction_endpoint::<T>),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint::<T>)
                .put(update_transaction_endpoint::<T>)
                .delete(delete_transaction_endpoint::<T>),
        )
        .with_state(state)
}
