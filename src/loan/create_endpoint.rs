//! Defines the endpoint for adding a loan.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    alert::Confirmation,
    domain::{Amount, LoanType},
    endpoints,
    loan::{Loan, insert_loan},
    session::Session,
    timezone::local_today,
};

/// The state needed to add a loan.
#[derive(Debug, Clone)]
pub struct CreateLoanState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// The session whose ledger records the expense for loans given.
    pub session: Arc<Mutex<Session>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateLoanState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            session: state.session.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for adding a loan.
#[derive(Debug, Deserialize)]
pub struct LoanForm {
    pub name: String,
    pub amount: f64,
    pub loan_type: LoanType,
    pub due_date: Date,
}

/// A route handler for adding a loan, redirects to the loans page on success.
///
/// A loan given is also recorded as an expense dated today. The two writes
/// are not atomic: if the expense fails the loan stays saved and
/// [Error::LoanExpenseNotRecorded] is returned.
pub async fn create_loan_endpoint(
    State(state): State<CreateLoanState>,
    Form(form): Form<LoanForm>,
) -> Response {
    let amount = match Amount::new(form.amount) {
        Ok(amount) => amount,
        Err(error) => return error.into_alert_response(),
    };

    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
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

    let loan = Loan {
        name: form.name,
        amount,
        loan_type: form.loan_type,
        due_date: form.due_date,
        user: session.user.clone(),
    };

    if let Err(error) = insert_loan(&loan, &connection) {
        tracing::error!("could not add loan: {error}");
        return error.into_alert_response();
    }

    let confirmation = match loan.as_expense(today) {
        Some(expense) => match session.ledger.append(expense, &connection) {
            Ok(()) => Confirmation::LoanRecordedAsExpense,
            Err(Error::LedgerReloadFailed(error)) => {
                tracing::warn!("loan expense saved but the ledger could not be reloaded: {error}");
                Confirmation::LoanRecordedAsExpense
            }
            Err(error) => {
                tracing::error!(
                    "loan \"{}\" was saved but its expense was not recorded: {error}",
                    loan.name
                );
                return Error::LoanExpenseNotRecorded(loan.name).into_alert_response();
            }
        },
        None => Confirmation::LoanAdded,
    };

    (
        HxRedirect(confirmation.redirect_url(endpoints::LOANS_VIEW)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
