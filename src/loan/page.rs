//! The loans page: a form for adding a loan and the list of loans.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error,
    alert::{Alert, ConfirmationQuery, or_load_error, page_alerts},
    domain::{Amount, LoanType},
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, dollar_input_styles, format_currency,
        submit_button,
    },
    loan::{Loan, get_all_loans},
    navigation::NavBar,
    timezone::local_today,
};

/// The state needed for the loans page.
#[derive(Debug, Clone)]
pub struct LoansViewState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub local_timezone: String,
}

impl FromRef<AppState> for LoansViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the form for adding a loan and the list of loans.
pub async fn get_loans_page(
    State(state): State<LoansViewState>,
    Query(query): Query<ConfirmationQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let (loans, load_error) = or_load_error(get_all_loans(&connection), "loans");
    let alerts = query.into_alert().into_iter().chain(load_error).collect();

    Ok(loans_view(today, &loans, alerts).into_response())
}

fn loans_view(today: Date, loans: &[Loan], alerts: Vec<Alert>) -> Markup {
    let nav_bar = NavBar::new(endpoints::LOANS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (page_alerts(alerts))

            h2 class="text-xl font-bold mb-4" { "Loans Management" }

            form
                hx-post=(endpoints::LOANS_API)
                hx-target-error="#alert-container"
                class="w-full max-w-md space-y-4"
            {
                h3 class="text-lg font-semibold" { "Add New Loan" }

                div
                {
                    label for="name" class=(FORM_LABEL_STYLE) { "Loan Name" }

                    input
                        name="name"
                        id="name"
                        type="text"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Loan Amount" }

                    div class="input-wrapper w-full"
                    {
                        input
                            name="amount"
                            id="amount"
                            type="number"
                            step="0.01"
                            min=(Amount::MIN)
                            placeholder="0.00"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="loan_type" class=(FORM_LABEL_STYLE) { "Loan Type" }

                    select name="loan_type" id="loan_type" required class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for loan_type in LoanType::ALL {
                            option value=(loan_type) { (loan_type) }
                        }
                    }
                }

                div
                {
                    label for="due_date" class=(FORM_LABEL_STYLE) { "Due Date" }

                    input
                        name="due_date"
                        id="due_date"
                        type="date"
                        required
                        value=(today)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (submit_button("Add Loan"))
            }

            section class="w-full max-w-screen-lg mt-8"
            {
                h3 class="text-lg font-semibold mb-2" { "Loans List" }

                @if loans.is_empty() {
                    p { "No loans available." }
                } @else {
                    (loans_table(loans))
                }
            }
        }
    };

    base("Loans", &[dollar_input_styles()], &content)
}

fn loans_table(loans: &[Loan]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table
                id="loans-table"
                class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Due Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "User" }
                    }
                }

                tbody
                {
                    @for loan in loans {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (loan.name) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(loan.amount.as_f64())) }
                            td class=(TABLE_CELL_STYLE) { (loan.loan_type) }
                            td class=(TABLE_CELL_STYLE) { (loan.due_date) }
                            td class=(TABLE_CELL_STYLE) { (loan.user) }
                        }
                    }
                }
            }
        }
    }
}
