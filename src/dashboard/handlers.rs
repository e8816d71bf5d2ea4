//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    aggregation::{Totals, calculate_totals, expenses_by_category, summarize_by_month},
    alert::{Alert, or_load_error, page_alerts},
    charts::{
        ECHARTS_SCRIPT, PageChart, charts_script, charts_view, expense_breakdown_chart,
        monthly_summary_chart,
    },
    dashboard::{cards::metric_cards, tables::monthly_summary_table},
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    session::Session,
    transaction::Transaction,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The session holding the cached ledger.
    pub session: Arc<Mutex<Session>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
        }
    }
}

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    totals: Totals,
    charts: Vec<PageChart>,
    tables: Vec<Markup>,
    /// Shown in place of the expense pie when there are no expenses.
    no_expenses: bool,
}

/// Display a page with an overview of the user's income and spending.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let session = state
        .session
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire session lock: {error}"))
        .map_err(|_| Error::SessionLockError)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);
    let (transactions, load_error) =
        or_load_error(session.ledger.try_transactions(), "transactions");

    match build_dashboard_data(transactions) {
        Some(data) => Ok(dashboard_view(nav_bar, &data).into_response()),
        None => Ok(dashboard_no_data_view(nav_bar, load_error).into_response()),
    }
}

/// Builds everything the dashboard shows from the ledger.
///
/// # Returns
/// `None` if there are no transactions.
fn build_dashboard_data(transactions: &[Transaction]) -> Option<DashboardData> {
    if transactions.is_empty() {
        return None;
    }

    let totals = calculate_totals(transactions);
    let summaries = summarize_by_month(transactions);
    let expenses = expenses_by_category(transactions);

    let mut charts = vec![PageChart {
        id: "monthly-summary-chart",
        options: monthly_summary_chart(&summaries).to_string(),
    }];

    if !expenses.is_empty() {
        charts.push(PageChart {
            id: "expense-breakdown-chart",
            options: expense_breakdown_chart(&expenses).to_string(),
        });
    }

    Some(DashboardData {
        totals,
        charts,
        tables: vec![monthly_summary_table(&summaries)],
        no_expenses: expenses.is_empty(),
    })
}

/// Renders the dashboard page when no transaction data exists or could be loaded.
fn dashboard_no_data_view(nav_bar: NavBar, load_error: Option<Alert>) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::TRANSACTIONS_VIEW, "transactions page");
    let warning = Alert::Warning {
        message: "No transactions available.".to_owned(),
        details: String::new(),
    };

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (page_alerts(load_error.into_iter().collect()))

            h2 class="text-xl font-bold mb-4" { "Dashboard" }

            div class="w-full max-w-md" { (warning.into_html()) }

            p
            {
                "Charts will show up here once you add some transactions on the "
                (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with metric cards, charts and tables.
fn dashboard_view(nav_bar: NavBar, data: &DashboardData) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold mb-4" { "Dashboard" }

            (metric_cards(&data.totals))

            (charts_view(&data.charts))

            @if data.no_expenses {
                p id="no-expenses" class="mb-4 text-gray-600 dark:text-gray-400" {
                    "No expenses to display."
                }
            }

            @for table in &data.tables {
                (table)
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(&data.charts),
    ];

    base("Dashboard", &scripts, &content)
}
