//! The budget management page: allocation form, budget vs actual chart and overspending warnings.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    aggregation::{BudgetComparison, compare_budget},
    alert::{Alert, ConfirmationQuery, or_load_error, page_alerts},
    budget::get_budget,
    charts::{ECHARTS_SCRIPT, PageChart, budget_comparison_chart, charts_script, charts_view},
    domain::Category,
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base,
        dollar_input_styles, format_currency, submit_button,
    },
    navigation::NavBar,
    session::Session,
};

/// The state needed for the budget page.
#[derive(Debug, Clone)]
pub struct BudgetViewState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub session: Arc<Mutex<Session>>,
}

impl FromRef<AppState> for BudgetViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            session: state.session.clone(),
        }
    }
}

/// Render the budget allocation form and compare the budget with actual spending.
pub async fn get_budget_page(
    State(state): State<BudgetViewState>,
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

    let (budget, budget_error) = or_load_error(get_budget(&connection), "the budget");
    let (transactions, ledger_error) =
        or_load_error(session.ledger.try_transactions(), "transactions");
    let comparisons = compare_budget(&budget, transactions);

    let mut alerts: Vec<Alert> = query
        .into_alert()
        .into_iter()
        .chain(budget_error)
        .chain(ledger_error)
        .collect();
    alerts.extend(overspending_alerts(&comparisons));

    Ok(budget_view(&budget, &comparisons, alerts).into_response())
}

/// One warning per category where more was spent than budgeted.
fn overspending_alerts(comparisons: &[BudgetComparison]) -> Vec<Alert> {
    comparisons
        .iter()
        .filter(|comparison| comparison.is_overspending())
        .map(|comparison| Alert::Warning {
            message: format!("Overspending in {}:", comparison.category),
            details: format!(
                "Budget {}, Actual {}",
                format_currency(comparison.budget),
                format_currency(comparison.actual)
            ),
        })
        .collect()
}

fn budget_view(
    budget: &HashMap<Category, f64>,
    comparisons: &[BudgetComparison],
    alerts: Vec<Alert>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGET_VIEW).into_html();
    let charts = [PageChart {
        id: "budget-comparison-chart",
        options: budget_comparison_chart(comparisons).to_string(),
    }];

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (page_alerts(alerts))

            h2 class="text-xl font-bold mb-4" { "Budget Management" }

            (budget_form(budget))

            section class="w-full max-w-screen-lg mt-8"
            {
                h3 class="text-lg font-semibold mb-2" { "Budget vs Actual Spending" }

                (charts_view(&charts))
            }
        }
    };

    let head_elements = [
        dollar_input_styles(),
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(&charts),
    ];

    base("Budget", &head_elements, &content)
}

fn budget_form(budget: &HashMap<Category, f64>) -> Markup {
    html! {
        form
            hx-post=(endpoints::BUDGET_API)
            hx-target-error="#alert-container"
            class="w-full max-w-md space-y-4"
        {
            h3 class="text-lg font-semibold" { "Set Budget Allocations" }

            @for (index, category) in Category::BUDGETED.iter().enumerate() {
                @let id = format!("budget-{index}");

                div
                {
                    label for=(id) class=(FORM_LABEL_STYLE) { "Budget for " (category) }

                    div class="input-wrapper w-full"
                    {
                        input
                            name=(category)
                            id=(id)
                            type="number"
                            step="0.01"
                            min="0"
                            required
                            value=(format!("{:.2}", budget.get(category).copied().unwrap_or(0.0)))
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }
            }

            (submit_button("Save Budget"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        extract::{FromRef, Query, State},
        http::StatusCode,
    };
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        alert::ConfirmationQuery,
        budget::{page::BudgetViewState, get_budget_page, save_budget},
        domain::{Amount, Category, TransactionType},
        endpoints,
        test_utils::{
            assert_form_input_with_value, assert_hx_endpoint, assert_valid_html,
            get_test_app_state, must_get_form, parse_html_document,
        },
        transaction::Transaction,
    };

    fn groceries(amount: f64) -> Transaction {
        Transaction {
            date: date!(2025 - 04 - 12),
            category: Category::FoodAndGroceries,
            amount: Amount::new(amount).unwrap(),
            description: "Supermarket".to_owned(),
            transaction_type: TransactionType::Expense,
            user: "default_user".to_owned(),
        }
    }

    #[tokio::test]
    async fn form_is_prefilled_with_saved_budget() {
        let app_state = get_test_app_state();
        save_budget(
            &HashMap::from([(Category::Entertainment, 45.5)]),
            &app_state.db_connection.lock().unwrap(),
        )
        .unwrap();
        let state = BudgetViewState::from_ref(&app_state);

        let response = get_budget_page(State(state), Query(ConfirmationQuery::default()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::BUDGET_API, "hx-post");
        assert_form_input_with_value(&form, "Entertainment", "number", "45.50");
        assert_form_input_with_value(&form, "Utilities", "number", "0.00");

        let inputs = form
            .select(&Selector::parse("input[type=number]").unwrap())
            .count();
        assert_eq!(inputs, Category::BUDGETED.len());
    }

    #[tokio::test]
    async fn warns_about_overspending() {
        let app_state = get_test_app_state();
        {
            let connection = app_state.db_connection.lock().unwrap();
            save_budget(&HashMap::from([(Category::FoodAndGroceries, 200.0)]), &connection)
                .unwrap();
            let mut session = app_state.session.lock().unwrap();
            session.ledger.append(groceries(250.0), &connection).unwrap();
        }
        let state = BudgetViewState::from_ref(&app_state);

        let response = get_budget_page(State(state), Query(ConfirmationQuery::default()))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let warnings: Vec<String> = html
            .select(&Selector::parse("#page-alerts [role=alert]").unwrap())
            .map(|alert| alert.text().collect())
            .collect();
        assert_eq!(
            warnings,
            ["Overspending in Food & Groceries: Budget $200.00, Actual $250.00"]
        );
    }

    #[tokio::test]
    async fn no_warnings_within_budget() {
        let app_state = get_test_app_state();
        {
            let connection = app_state.db_connection.lock().unwrap();
            save_budget(&HashMap::from([(Category::FoodAndGroceries, 300.0)]), &connection)
                .unwrap();
            let mut session = app_state.session.lock().unwrap();
            session.ledger.append(groceries(250.0), &connection).unwrap();
        }
        let state = BudgetViewState::from_ref(&app_state);

        let response = get_budget_page(State(state), Query(ConfirmationQuery::default()))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert!(
            html.select(&Selector::parse("#page-alerts").unwrap())
                .next()
                .is_none()
        );
        assert!(
            html.select(&Selector::parse("#budget-comparison-chart").unwrap())
                .next()
                .is_some()
        );
    }
}
