//! Defines the endpoint for updating the savings goal.
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

use crate::{
    AppState, Error, alert::Confirmation, domain::non_negative, endpoints,
    savings::save_savings_goal, session::Session,
};

/// The state needed to update the savings goal.
#[derive(Debug, Clone)]
pub struct UpdateSavingsGoalState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// The session caching the goal.
    pub session: Arc<Mutex<Session>>,
}

impl FromRef<AppState> for UpdateSavingsGoalState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            session: state.session.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SavingsGoalForm {
    /// The goal in dollars.
    pub goal: f64,
}

/// A route handler for saving a new savings goal, redirects to the savings
/// page on success.
///
/// The session's cached goal is only changed once the goal has been stored.
pub async fn update_savings_goal_endpoint(
    State(state): State<UpdateSavingsGoalState>,
    Form(form): Form<SavingsGoalForm>,
) -> Response {
    let goal = match non_negative(form.goal) {
        Ok(goal) => goal,
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

    if let Err(error) = save_savings_goal(&session.user, goal, &connection) {
        tracing::error!("could not save the savings goal: {error}");
        return error.into_alert_response();
    }

    session.savings_goal = goal;
    tracing::info!("Savings goal for {} set to {goal}", session.user);

    (
        HxRedirect(Confirmation::SavingsGoalUpdated.redirect_url(endpoints::SAVINGS_VIEW)),
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

    use crate::{
        savings::{
            get_savings_goal, update_endpoint::SavingsGoalForm,
            update_endpoint::UpdateSavingsGoalState, update_savings_goal_endpoint,
        },
        test_utils::{assert_hx_redirect, get_test_app_state},
    };

    #[tokio::test]
    async fn updates_store_and_session() {
        let state = UpdateSavingsGoalState::from_ref(&get_test_app_state());

        let response =
            update_savings_goal_endpoint(State(state.clone()), Form(SavingsGoalForm { goal: 2500.0 }))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/savings?confirmation=savings_goal_updated");
        assert_eq!(
            get_savings_goal("default_user", &state.db_connection.lock().unwrap()),
            Ok(2500.0)
        );
        assert_eq!(state.session.lock().unwrap().savings_goal, 2500.0);
    }

    #[tokio::test]
    async fn zero_goal_is_allowed() {
        let state = UpdateSavingsGoalState::from_ref(&get_test_app_state());

        let response =
            update_savings_goal_endpoint(State(state.clone()), Form(SavingsGoalForm { goal: 0.0 }))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn rejects_negative_goal() {
        let state = UpdateSavingsGoalState::from_ref(&get_test_app_state());
        state.session.lock().unwrap().savings_goal = 100.0;

        let response =
            update_savings_goal_endpoint(State(state.clone()), Form(SavingsGoalForm { goal: -1.0 }))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.session.lock().unwrap().savings_goal, 100.0);
    }
}
