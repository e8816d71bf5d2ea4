//! Defines the route handler for the page that adds transactions and lists them as a table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error,
    alert::{Alert, ConfirmationQuery, or_load_error, page_alerts},
    domain::{Amount, Category, TransactionType},
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, dollar_input_styles, format_currency,
        submit_button,
    },
    navigation::NavBar,
    session::Session,
    timezone::local_today,
    transaction::Transaction,
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The session holding the cached ledger.
    session: Arc<Mutex<Session>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    local_timezone: String,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the form for adding a transaction and the transaction history.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query): Query<ConfirmationQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let session = state
        .session
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire session lock: {error}"))
        .map_err(|_| Error::SessionLockError)?;

    let (transactions, load_error) =
        or_load_error(session.ledger.try_transactions(), "transactions");
    let history = newest_first(transactions);
    let alerts = query.into_alert().into_iter().chain(load_error).collect();

    Ok(transactions_view(today, &history, alerts).into_response())
}

/// Sort transactions by date, newest first. Transactions on the same day
/// keep the most recently recorded first.
fn newest_first(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<_> = transactions.iter().rev().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

fn transactions_view(
    today: Date,
    history: &[&Transaction],
    alerts: Vec<Alert>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (page_alerts(alerts))

            h2 class="text-xl font-bold mb-4" { "Transactions" }

            (transaction_form(today))

            section class="w-full max-w-screen-lg mt-8"
            {
                h3 class="text-lg font-semibold mb-2" { "Transaction History" }

                @if history.is_empty() {
                    p { "No transactions recorded yet." }
                } @else {
                    (history_table(history))
                }
            }
        }
    };

    base("Transactions", &[dollar_input_styles()], &content)
}

fn transaction_form(today: Date) -> Markup {
    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target-error="#alert-container"
            class="w-full max-w-md space-y-4"
        {
            h3 class="text-lg font-semibold" { "Add Transaction" }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    required
                    value=(today)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category" id="category" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for category in Category::ALL {
                        option value=(category) { (category) }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                // w-full needed to ensure input takes the full width when prefilled with a value
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
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Description"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="transaction_type" class=(FORM_LABEL_STYLE) { "Type" }

                select
                    name="transaction_type"
                    id="transaction_type"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for transaction_type in TransactionType::ALL {
                        option value=(transaction_type) { (transaction_type) }
                    }
                }
            }

            (submit_button("Add Transaction"))
        }
    }
}

fn history_table(history: &[&Transaction]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                    }
                }

                tbody
                {
                    @for transaction in history {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (transaction.date) }
                            td class=(TABLE_CELL_STYLE) { (transaction.category) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(transaction.amount.as_f64())) }
                            td class=(TABLE_CELL_STYLE) { (transaction.description) }
                            td class=(TABLE_CELL_STYLE) { (transaction.transaction_type) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{FromRef, Query, State},
        http::StatusCode,
    };
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        alert::{Confirmation, ConfirmationQuery},
        domain::{Amount, Category, TransactionType},
        endpoints,
        test_utils::{
            assert_form_input, assert_form_submit_button_with_text, assert_hx_endpoint,
            assert_valid_html, get_test_app_state, insert_unreadable_row, must_get_form,
            parse_html_document,
        },
        transaction::{
            Transaction,
            transactions_page::{TransactionsViewState, get_transactions_page},
        },
    };

    fn expense(date: time::Date, description: &str) -> Transaction {
        Transaction {
            date,
            category: Category::Shopping,
            amount: Amount::new(20.0).unwrap(),
            description: description.to_owned(),
            transaction_type: TransactionType::Expense,
            user: "default_user".to_owned(),
        }
    }

    #[tokio::test]
    async fn page_has_transaction_form() {
        let state = TransactionsViewState::from_ref(&get_test_app_state());

        let response = get_transactions_page(State(state), Query(ConfirmationQuery::default()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_input(&form, "date", "date");
        assert_form_input(&form, "amount", "number");
        assert_form_submit_button_with_text(&form, "Add Transaction");

        let categories = form
            .select(&Selector::parse("select[name=category] option").unwrap())
            .count();
        assert_eq!(categories, Category::ALL.len());
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let app_state = get_test_app_state();
        {
            let connection = app_state.db_connection.lock().unwrap();
            let mut session = app_state.session.lock().unwrap();
            for transaction in [
                expense(date!(2025 - 01 - 01), "oldest"),
                expense(date!(2025 - 03 - 01), "newest"),
                expense(date!(2025 - 02 - 01), "middle"),
            ] {
                session.ledger.append(transaction, &connection).unwrap();
            }
        }
        let state = TransactionsViewState::from_ref(&app_state);

        let response = get_transactions_page(State(state), Query(ConfirmationQuery::default()))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let descriptions: Vec<_> = html
            .select(&Selector::parse("tbody tr td:nth-child(4)").unwrap())
            .map(|cell| cell.text().collect::<String>())
            .collect();
        assert_eq!(descriptions, ["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn shows_error_when_ledger_cannot_be_loaded() {
        let app_state = get_test_app_state();
        {
            let connection = app_state.db_connection.lock().unwrap();
            let mut session = app_state.session.lock().unwrap();
            insert_unreadable_row(&connection);
            assert!(session.ledger.reload(&connection).is_err());
        }
        let state = TransactionsViewState::from_ref(&app_state);
        let query = ConfirmationQuery {
            confirmation: Some(Confirmation::TransactionAdded),
        };

        let response = get_transactions_page(State(state), Query(query))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let text = html.html();
        assert!(text.contains("Transaction added successfully!"));
        assert!(text.contains("Could not load transactions."));
    }

    #[tokio::test]
    async fn shows_confirmation() {
        let state = TransactionsViewState::from_ref(&get_test_app_state());
        let query = ConfirmationQuery {
            confirmation: Some(Confirmation::TransactionAdded),
        };

        let response = get_transactions_page(State(state), Query(query))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert!(html.html().contains("Transaction added successfully!"));
    }
}
