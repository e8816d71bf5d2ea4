//! The savings goal page: the goal form and progress towards the goal.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    aggregation::calculate_totals,
    alert::{Alert, ConfirmationQuery, or_load_error, page_alerts},
    automated_payment::{get_all_automated_payments, total_automated_payments},
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base,
        dollar_input_styles, format_currency, submit_button,
    },
    navigation::NavBar,
    savings::{SavingsProgress, calculate_savings_progress},
    session::Session,
};

/// The state needed for the savings page.
#[derive(Debug, Clone)]
pub struct SavingsViewState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub session: Arc<Mutex<Session>>,
}

impl FromRef<AppState> for SavingsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            session: state.session.clone(),
        }
    }
}

/// Render the savings goal form and the progress towards the goal.
pub async fn get_savings_page(
    State(state): State<SavingsViewState>,
    Query(query): Query<ConfirmationQuery>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let session = state
        .session
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire session lock: {error}"))
        .map_err(|_| Error::SessionLockError)?;

    let (payments, payments_error) = or_load_error(
        get_all_automated_payments(&connection),
        "automated payments",
    );
    let (transactions, ledger_error) =
        or_load_error(session.ledger.try_transactions(), "transactions");

    let totals = calculate_totals(transactions);
    let progress = calculate_savings_progress(
        totals.income,
        totals.expenses,
        total_automated_payments(&payments),
        session.savings_goal,
    );

    let alerts = query
        .into_alert()
        .into_iter()
        .chain(payments_error)
        .chain(ledger_error)
        .collect();

    Ok(savings_view(session.savings_goal, &progress, alerts).into_response())
}

fn savings_view(goal: f64, progress: &SavingsProgress, alerts: Vec<Alert>) -> Markup {
    let nav_bar = NavBar::new(endpoints::SAVINGS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (page_alerts(alerts))

            h2 class="text-xl font-bold mb-4" { "Savings Goals" }

            (goal_form(goal))

            section id="savings-progress" class="w-full max-w-md mt-8 space-y-2"
            {
                (progress_bar(progress.progress))

                p id="current-savings" { "Current savings: " (format_currency(progress.adjusted_savings)) }
                p id="goal-progress" { "Progress towards goal: " (progress.percent()) }
            }
        }
    };

    base("Savings", &[dollar_input_styles()], &content)
}

fn goal_form(goal: f64) -> Markup {
    html! {
        form
            hx-post=(endpoints::SAVINGS_GOAL_API)
            hx-target-error="#alert-container"
            class="w-full max-w-md space-y-4"
        {
            div
            {
                label for="goal" class=(FORM_LABEL_STYLE) { "Set your savings goal" }

                div class="input-wrapper w-full"
                {
                    input
                        name="goal"
                        id="goal"
                        type="number"
                        step="0.01"
                        min="0"
                        required
                        value=(format!("{goal:.2}"))
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            (submit_button("Update Savings Goal"))
        }
    }
}

fn progress_bar(progress: f64) -> Markup {
    let width = format!("width: {:.1}%", progress * 100.0);

    html! {
        div
            role="progressbar"
            aria-valuemin="0"
            aria-valuemax="100"
            aria-valuenow=(format!("{:.1}", progress * 100.0))
            class="w-full h-4 bg-gray-200 rounded-full dark:bg-gray-700"
        {
            div class="h-4 bg-blue-600 rounded-full" style=(width) {}
        }
    }
}
