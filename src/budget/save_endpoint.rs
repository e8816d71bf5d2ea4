//! Defines the endpoint for saving the budget allocations.
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Confirmation,
    budget::{parse_budget_form, save_budget},
    endpoints,
};

/// The state needed to save the budget.
#[derive(Debug, Clone)]
pub struct SaveBudgetState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SaveBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for saving the budget form, keyed by category label.
/// Redirects to the budget page on success.
pub async fn save_budget_endpoint(
    State(state): State<SaveBudgetState>,
    Form(form): Form<HashMap<String, f64>>,
) -> Response {
    let budget = match parse_budget_form(form) {
        Ok(budget) => budget,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = save_budget(&budget, &connection) {
        tracing::error!("could not save the budget: {error}");
        return error.into_alert_response();
    }

    tracing::info!("Saved budget for {} categories", budget.len());

    (
        HxRedirect(Confirmation::BudgetSaved.redirect_url(endpoints::BUDGET_VIEW)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        extract::{FromRef, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::Form;

    use crate::{
        budget::{get_budget, save_budget_endpoint, save_endpoint::SaveBudgetState},
        domain::Category,
        test_utils::{assert_hx_redirect, get_test_app_state},
    };

    #[tokio::test]
    async fn saves_budget_and_redirects() {
        let state = SaveBudgetState::from_ref(&get_test_app_state());
        let form: HashMap<String, f64> =
            serde_html_form::from_str("Food+%26+Groceries=200&Transportation=50.25").unwrap();

        let response = save_budget_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/budget?confirmation=budget_saved");
        let budget = get_budget(&state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(budget[&Category::FoodAndGroceries], 200.0);
        assert_eq!(budget[&Category::Transportation], 50.25);
        assert_eq!(budget[&Category::Other], 0.0);
    }

    #[tokio::test]
    async fn rejects_salary_without_saving() {
        let state = SaveBudgetState::from_ref(&get_test_app_state());
        let form = HashMap::from([
            ("Shopping".to_owned(), 20.0),
            ("Salary".to_owned(), 1000.0),
        ]);

        let response = save_budget_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let budget = get_budget(&state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(budget[&Category::Shopping], 0.0);
    }

    #[tokio::test]
    async fn rejects_negative_amount() {
        let state = SaveBudgetState::from_ref(&get_test_app_state());
        let form = HashMap::from([("Utilities".to_owned(), -1.0)]);

        let response = save_budget_endpoint(State(state), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
