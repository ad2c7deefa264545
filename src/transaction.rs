//! The HTTP route layer for transactions.
//!
//! Each handler delegates to the [TransactionStore] held in [AppState] and
//! translates the outcome to a status code. Malformed IDs and bodies are
//! caught here through explicit extractor rejections so that they surface as
//! 400 responses instead of the framework's defaults.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{
    AppState, Error,
    database_id::TransactionId,
    models::{CategorySummary, Transaction, TransactionBuilder},
    stores::TransactionStore,
};

/// A route handler for listing all transactions.
pub async fn get_transactions_endpoint<T>(
    State(state): State<AppState<T>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    state.transaction_store.get_all().map(Json)
}

/// A route handler for fetching a single transaction by its ID.
///
/// Responds with 400 when the ID path segment is not an integer and 404 when
/// no transaction matches.
pub async fn get_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    id: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let Path(id) = id.map_err(|rejection| Error::InvalidTransactionId(rejection.body_text()))?;

    state.transaction_store.get(id).map(Json)
}

/// A route handler for creating a new transaction.
///
/// Responds with 201 and the storage-assigned ID. Any ID in the request body
/// is ignored.
pub async fn create_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    body: Result<Json<TransactionBuilder>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionId>), Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let Json(builder) = body.map_err(|rejection| Error::InvalidRecord(rejection.body_text()))?;

    let mut store = state.transaction_store;
    let transaction = store.create(builder)?;

    Ok((StatusCode::CREATED, Json(transaction.id)))
}

/// A route handler for overwriting an existing transaction.
///
/// Responds with 404 when `transaction_id` does not refer to a stored
/// transaction rather than silently succeeding.
pub async fn update_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    id: Result<Path<TransactionId>, PathRejection>,
    body: Result<Json<TransactionBuilder>, JsonRejection>,
) -> Result<StatusCode, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let Path(id) = id.map_err(|rejection| Error::InvalidTransactionId(rejection.body_text()))?;
    let Json(builder) = body.map_err(|rejection| Error::InvalidRecord(rejection.body_text()))?;

    let mut store = state.transaction_store;
    store.update(id, builder)?;

    Ok(StatusCode::OK)
}

/// A route handler for deleting a transaction.
///
/// Responds with 404 when `transaction_id` does not refer to a stored
/// transaction rather than silently succeeding.
pub async fn delete_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    id: Result<Path<TransactionId>, PathRejection>,
) -> Result<StatusCode, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let Path(id) = id.map_err(|rejection| Error::InvalidTransactionId(rejection.body_text()))?;

    let mut store = state.transaction_store;
    store.delete(id)?;

    Ok(StatusCode::OK)
}

/// A route handler for the per-category summary of all transactions.
pub async fn transaction_summary_endpoint<T>(
    State(state): State<AppState<T>>,
) -> Result<Json<Vec<CategorySummary>>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    state.transaction_store.summarize().map(Json)
}

#[cfg(test)]
mod transaction_route_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        build_router,
        database_id::TransactionId,
        endpoints::{self, format_endpoint},
        models::{CategorySummary, Transaction},
        stores::sqlite::create_app_state,
    };

    fn new_test_server() -> TestServer {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = create_app_state(db_connection).expect("Could not initialize database.");

        TestServer::new(build_router(state))
    }

    fn transaction_json(amount: f64, category: &str) -> Value {
        json!({
            "amount": amount,
            "date": "2024-07-14",
            "category": category,
            "description": "card payment",
            "type": "expense",
        })
    }

    async fn create_transaction(server: &TestServer, body: &Value) -> TransactionId {
        let response = server
            .post(endpoints::TRANSACTIONS)
            .content_type("application/json")
            .json(body)
            .await;

        response.assert_status(StatusCode::CREATED);

        response.json::<TransactionId>()
    }

    #[tokio::test]
    async fn create_responds_with_created_and_id() {
        let server = new_test_server();

        let id = create_transaction(&server, &transaction_json(12.3, "Groceries")).await;

        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let server = new_test_server();
        let body = transaction_json(12.3, "Groceries");

        let id = create_transaction(&server, &body).await;

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, id))
            .await;

        response.assert_status_ok();

        let got = response.json::<Transaction>();
        assert_eq!(got.id, id);
        assert_eq!(got.amount, 12.3);
        assert_eq!(got.category, "Groceries");
        assert_eq!(got.description, Some("card payment".to_owned()));
        assert_eq!(got.kind, "expense");
    }

    #[tokio::test]
    async fn create_ignores_client_supplied_id() {
        let server = new_test_server();
        let mut body = transaction_json(12.3, "Groceries");
        body["id"] = json!(999);

        let id = create_transaction(&server, &body).await;

        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn create_fails_on_malformed_body() {
        let server = new_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .content_type("application/json")
            .json(&json!({ "amount": "not a number" }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn create_fails_on_malformed_date() {
        let server = new_test_server();
        let mut body = transaction_json(12.3, "Groceries");
        body["date"] = json!("14/07/2024");

        let response = server
            .post(endpoints::TRANSACTIONS)
            .content_type("application/json")
            .json(&body)
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn get_fails_on_missing_transaction() {
        let server = new_test_server();

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, 999))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn get_fails_on_non_numeric_id() {
        let server = new_test_server();

        let response = server.get("/transactions/abc").await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn list_returns_all_transactions() {
        let server = new_test_server();
        let mut want = Vec::new();

        for (amount, category) in [(12.3, "Groceries"), (-45.6, "Rent"), (78.9, "Salary")] {
            let body = transaction_json(amount, category);
            let id = create_transaction(&server, &body).await;
            want.push((id, amount, category.to_owned()));
        }

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status_ok();

        let got = response.json::<Vec<Transaction>>();
        assert_eq!(got.len(), want.len());

        for (id, amount, category) in want {
            assert!(
                got.iter()
                    .any(|t| t.id == id && t.amount == amount && t.category == category),
                "transaction {id} is missing from {got:?}"
            );
        }
    }

    #[tokio::test]
    async fn update_overwrites_transaction() {
        let server = new_test_server();
        let id = create_transaction(&server, &transaction_json(12.3, "Groceries")).await;

        let replacement = json!({
            "amount": 99.9,
            "date": "2025-01-02",
            "category": "Utilities",
            "description": null,
            "type": "income",
        });

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, id))
            .content_type("application/json")
            .json(&replacement)
            .await;

        response.assert_status_ok();
        assert_eq!(response.text(), "", "update should have an empty body");

        let got = server
            .get(&format_endpoint(endpoints::TRANSACTION, id))
            .await
            .json::<Transaction>();

        assert_eq!(got.id, id);
        assert_eq!(got.amount, 99.9);
        assert_eq!(got.category, "Utilities");
        assert_eq!(got.description, None);
        assert_eq!(got.kind, "income");
    }

    #[tokio::test]
    async fn update_fails_on_missing_transaction() {
        let server = new_test_server();

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, 999))
            .content_type("application/json")
            .json(&transaction_json(1.0, "Groceries"))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn update_fails_on_non_numeric_id() {
        let server = new_test_server();

        let response = server
            .put("/transactions/abc")
            .content_type("application/json")
            .json(&transaction_json(1.0, "Groceries"))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn delete_removes_transaction() {
        let server = new_test_server();
        let id = create_transaction(&server, &transaction_json(12.3, "Groceries")).await;

        let response = server
            .delete(&format_endpoint(endpoints::TRANSACTION, id))
            .await;

        response.assert_status_ok();
        assert_eq!(response.text(), "", "delete should have an empty body");

        server
            .get(&format_endpoint(endpoints::TRANSACTION, id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_fails_on_missing_transaction() {
        let server = new_test_server();

        let response = server
            .delete(&format_endpoint(endpoints::TRANSACTION, 999))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_fails_on_non_numeric_id() {
        let server = new_test_server();

        let response = server.delete("/transactions/abc").await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn summary_groups_by_category() {
        let server = new_test_server();

        for (amount, category) in [(10.0, "food"), (5.0, "food"), (20.0, "rent")] {
            create_transaction(&server, &transaction_json(amount, category)).await;
        }

        let response = server.get(endpoints::TRANSACTION_SUMMARY).await;

        response.assert_status_ok();

        let mut got = response.json::<Vec<CategorySummary>>();
        got.sort_by(|a, b| a.category.cmp(&b.category));

        assert_eq!(
            got,
            vec![
                CategorySummary {
                    category: "food".to_owned(),
                    total_amount: 15.0,
                    total_transactions: 2,
                },
                CategorySummary {
                    category: "rent".to_owned(),
                    total_amount: 20.0,
                    total_transactions: 1,
                },
            ]
        );
    }

    #[tokio::test]
    async fn summary_is_not_parsed_as_transaction_id() {
        let server = new_test_server();

        // With no transactions stored, the literal route answers 200 with an
        // empty array. The `{transaction_id}` matcher would answer 400.
        let response = server.get(endpoints::TRANSACTION_SUMMARY).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<CategorySummary>>(), vec![]);
    }

    #[tokio::test]
    async fn description_null_round_trips() {
        let server = new_test_server();
        let body = json!({
            "amount": 12.3,
            "date": "2024-07-14",
            "category": "Groceries",
            "type": "expense",
        });

        let id = create_transaction(&server, &body).await;

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, id))
            .await;

        let value = response.json::<Value>();
        assert_eq!(
            value["description"],
            Value::Null,
            "a missing description must round-trip as null, not an empty string"
        );
    }
}
