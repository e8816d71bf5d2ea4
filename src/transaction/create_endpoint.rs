//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    alert::Confirmation,
    domain::{Amount, Category, TransactionType},
    endpoints,
    session::Session,
    transaction::Transaction,
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for storing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The session whose ledger is reloaded after the insert.
    pub session: Arc<Mutex<Session>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            session: state.session.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// When the transaction happened.
    pub date: Date,
    pub category: Category,
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
    pub transaction_type: TransactionType,
}

/// A route handler for creating a new transaction, redirects to transactions view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let amount = match Amount::new(form.amount) {
        Ok(amount) => amount,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let mut session = match state.session.lock() {
        Ok(session) => session,
        Err(error) => {
            tracing::error!("could not acquire session lock: {error}");
            return Error::SessionLockError.into_alert_response();
        }
    };

    let transaction = Transaction {
        date: form.date,
        category: form.category,
        amount,
        description: form.description,
        transaction_type: form.transaction_type,
        user: session.user.clone(),
    };

    match session.ledger.append(transaction, &connection) {
        Ok(()) => {}
        // The row is stored, so confirm it. The transactions page reports the
        // failed reload.
        Err(Error::LedgerReloadFailed(error)) => {
            tracing::warn!("transaction saved but the ledger could not be reloaded: {error}");
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");

            return error.into_alert_response();
        }
    }

    (
        HxRedirect(Confirmation::TransactionAdded.redirect_url(endpoints::TRANSACTIONS_VIEW)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{FromRef, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use time::macros::date;

    use crate::{
        domain::{Category, TransactionType},
        test_utils::{
            assert_hx_redirect, get_test_app_state, insert_unreadable_row, parse_html_fragment,
        },
        transaction::{
            create_endpoint::{CreateTransactionState, TransactionForm},
            create_transaction_endpoint, get_all_transactions,
        },
    };

    fn rent_form(amount: f64) -> TransactionForm {
        TransactionForm {
            date: date!(2025 - 09 - 01),
            category: Category::HousingRent,
            amount,
            description: "September rent".to_owned(),
            transaction_type: TransactionType::Expense,
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let app_state = get_test_app_state();
        let state = CreateTransactionState::from_ref(&app_state);

        let response = create_transaction_endpoint(State(state.clone()), Form(rent_form(1200.0)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/transactions?confirmation=transaction_added");

        let connection = state.db_connection.lock().unwrap();
        let stored = get_all_transactions(&connection).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].amount.as_f64(), 1200.0);
        assert_eq!(stored[0].user, "default_user");

        let session = state.session.lock().unwrap();
        assert_eq!(session.ledger.transactions(), stored.as_slice());
    }

    #[tokio::test]
    async fn rejects_non_positive_amount() {
        let app_state = get_test_app_state();
        let state = CreateTransactionState::from_ref(&app_state);

        let response = create_transaction_endpoint(State(state.clone()), Form(rent_form(0.0)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let alert = parse_html_fragment(response).await;
        assert!(alert.html().contains("Invalid amount"));
        assert!(state.session.lock().unwrap().ledger.is_empty());
    }

    #[tokio::test]
    async fn confirms_save_when_reload_fails() {
        let app_state = get_test_app_state();
        let state = CreateTransactionState::from_ref(&app_state);
        insert_unreadable_row(&state.db_connection.lock().unwrap());

        let response = create_transaction_endpoint(State(state.clone()), Form(rent_form(1200.0)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/transactions?confirmation=transaction_added");

        let stored: i64 = state
            .db_connection
            .lock()
            .unwrap()
            .query_row(
                "SELECT COUNT(*) FROM transactions WHERE Description = 'September rent'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(stored, 1);
        assert!(state.session.lock().unwrap().ledger.try_transactions().is_err());
    }

    #[tokio::test]
    async fn rejects_fraction_of_a_cent() {
        let app_state = get_test_app_state();
        let state = CreateTransactionState::from_ref(&app_state);

        let response = create_transaction_endpoint(State(state.clone()), Form(rent_form(0.001)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let connection = state.db_connection.lock().unwrap();
        assert!(get_all_transactions(&connection).unwrap().is_empty());
    }

    #[test]
    fn form_decodes_labels() {
        let form: TransactionForm = serde_html_form::from_str(
            "date=2025-09-01&category=Housing%2FRent&amount=1200&description=&transaction_type=Expense",
        )
        .unwrap();

        assert_eq!(form.date, date!(2025 - 09 - 01));
        assert_eq!(form.category, Category::HousingRent);
        assert_eq!(form.transaction_type, TransactionType::Expense);
    }
}
