//! Defines the endpoint for adding an automated payment.
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
    automated_payment::{AutomatedPayment, insert_automated_payment},
    domain::{Amount, Frequency},
    endpoints,
    session::Session,
};

/// The state needed to add an automated payment.
#[derive(Debug, Clone)]
pub struct CreateAutomatedPaymentState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// The session providing the user the payment is recorded against.
    pub session: Arc<Mutex<Session>>,
}

impl FromRef<AppState> for CreateAutomatedPaymentState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            session: state.session.clone(),
        }
    }
}

/// The form data for adding an automated payment.
#[derive(Debug, Deserialize)]
pub struct AutomatedPaymentForm {
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    pub next_payment_date: Date,
}

/// A route handler for adding an automated payment, redirects to the
/// automated payments page on success.
pub async fn create_automated_payment_endpoint(
    State(state): State<CreateAutomatedPaymentState>,
    Form(form): Form<AutomatedPaymentForm>,
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

    let user = match state.session.lock() {
        Ok(session) => session.user.clone(),
        Err(error) => {
            tracing::error!("could not acquire session lock: {error}");
            return Error::SessionLockError.into_alert_response();
        }
    };

    let payment = AutomatedPayment {
        name: form.name,
        amount,
        frequency: form.frequency,
        next_payment_date: form.next_payment_date,
        user,
    };

    if let Err(error) = insert_automated_payment(&payment, &connection) {
        tracing::error!("could not add automated payment: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(
            Confirmation::AutomatedPaymentAdded.redirect_url(endpoints::AUTOMATED_PAYMENTS_VIEW),
        ),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
