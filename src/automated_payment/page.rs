//! The automated payments page: a form for adding a payment and the list of payments.

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
    automated_payment::{AutomatedPayment, get_all_automated_payments},
    domain::{Amount, Frequency},
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, dollar_input_styles, format_currency,
        submit_button,
    },
    navigation::NavBar,
    timezone::local_today,
};

/// The state needed for the automated payments page.
#[derive(Debug, Clone)]
pub struct AutomatedPaymentsViewState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub local_timezone: String,
}

impl FromRef<AppState> for AutomatedPaymentsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the form for adding an automated payment and the list of payments.
pub async fn get_automated_payments_page(
    State(state): State<AutomatedPaymentsViewState>,
    Query(query): Query<ConfirmationQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let (payments, load_error) = or_load_error(
        get_all_automated_payments(&connection),
        "automated payments",
    );
    let alerts = query.into_alert().into_iter().chain(load_error).collect();

    Ok(automated_payments_view(today, &payments, alerts).into_response())
}

fn automated_payments_view(today: Date, payments: &[AutomatedPayment], alerts: Vec<Alert>) -> Markup {
    let nav_bar = NavBar::new(endpoints::AUTOMATED_PAYMENTS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (page_alerts(alerts))

            h2 class="text-xl font-bold mb-4" { "Automated Payments" }

            (payment_form(today))

            section class="w-full max-w-screen-lg mt-8"
            {
                h3 class="text-lg font-semibold mb-2" { "Automated Payments List" }

                @if payments.is_empty() {
                    p { "No automated payments available." }
                } @else {
                    (payments_table(payments))
                }
            }
        }
    };

    base("Automated Payments", &[dollar_input_styles()], &content)
}

fn payment_form(today: Date) -> Markup {
    html! {
        form
            hx-post=(endpoints::AUTOMATED_PAYMENTS_API)
            hx-target-error="#alert-container"
            class="w-full max-w-md space-y-4"
        {
            h3 class="text-lg font-semibold" { "Add New Automated Payment" }

            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Payment Name" }

                input
                    name="name"
                    id="name"
                    type="text"
                    placeholder="e.g. Rent"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

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
                label for="frequency" class=(FORM_LABEL_STYLE) { "Frequency" }

                select name="frequency" id="frequency" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for frequency in Frequency::ALL {
                        option value=(frequency) { (frequency) }
                    }
                }
            }

            div
            {
                label for="next_payment_date" class=(FORM_LABEL_STYLE) { "Next Payment Date" }

                input
                    name="next_payment_date"
                    id="next_payment_date"
                    type="date"
                    required
                    value=(today)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (submit_button("Add Automated Payment"))
        }
    }
}

fn payments_table(payments: &[AutomatedPayment]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table
                id="automated-payments-table"
                class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Frequency" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Next Payment" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "User" }
                    }
                }

                tbody
                {
                    @for payment in payments {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (payment.name) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(payment.amount.as_f64())) }
                            td class=(TABLE_CELL_STYLE) { (payment.frequency) }
                            td class=(TABLE_CELL_STYLE) { (payment.next_payment_date) }
                            td class=(TABLE_CELL_STYLE) { (payment.user) }
                        }
                    }
                }
            }
        }
    }
}
