//! Data export: a page linking to the CSV download, and the download itself.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::header,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    alert::{Alert, or_load_error, page_alerts},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    session::Session,
    transaction::Transaction,
};

/// The name the browser saves the export as.
pub const EXPORT_FILE_NAME: &str = "personal_finance_data.csv";

const CSV_HEADER: [&str; 6] = ["Date", "Category", "Amount", "Description", "Type", "User"];

/// The state needed to export the transactions.
#[derive(Debug, Clone)]
pub struct ExportState {
    pub session: Arc<Mutex<Session>>,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
        }
    }
}

/// Write `transactions` as CSV, one row per transaction after a header row.
///
/// Dates are written as `YYYY-MM-DD` and amounts in their shortest exact form
/// with at least one decimal, e.g. `100.0`.
///
/// # Errors
/// Returns [Error::CsvExportError] if the CSV could not be written.
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for transaction in transactions {
        writer.write_record([
            transaction.date.to_string(),
            transaction.category.to_string(),
            format!("{:?}", transaction.amount.as_f64()),
            transaction.description.clone(),
            transaction.transaction_type.to_string(),
            transaction.user.clone(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvExportError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvExportError(error.to_string()))
}

/// Download every transaction in the ledger as a CSV file.
///
/// Fails with [Error::LedgerUnavailable] rather than sending an empty file
/// when the transactions could not be loaded.
pub async fn export_transactions_endpoint(
    State(state): State<ExportState>,
) -> Result<Response, Error> {
    let session = state
        .session
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire session lock: {error}"))
        .map_err(|_| Error::SessionLockError)?;

    let transactions = session.ledger.try_transactions()?;
    let csv = transactions_to_csv(transactions)?;
    tracing::info!("Exported {} transactions to CSV", transactions.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

/// Display the page with the download link.
pub async fn get_export_page(State(state): State<ExportState>) -> Result<Response, Error> {
    let session = state
        .session
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire session lock: {error}"))
        .map_err(|_| Error::SessionLockError)?;

    let (_, load_error) = or_load_error(session.ledger.try_transactions(), "transactions");

    Ok(export_view(load_error.into_iter().collect()).into_response())
}

fn export_view(alerts: Vec<Alert>) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPORT_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (page_alerts(alerts))

            h2 class="text-xl font-bold mb-4" { "Export Data" }

            p class="mb-4" { "Download every transaction as a CSV file." }

            a
                id="download-csv"
                href=(endpoints::EXPORT_API)
                download=(EXPORT_FILE_NAME)
                class={ "block max-w-xs text-center " (BUTTON_PRIMARY_STYLE) }
            {
                "Download CSV"
            }
        }
    };

    base("Export", &[], &content)
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{FromRef, State},
        http::{StatusCode, header},
    };
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        Error,
        domain::{Amount, Category, TransactionType},
        endpoints,
        export::{ExportState, export_transactions_endpoint, get_export_page, transactions_to_csv},
        test_utils::{
            assert_valid_html, get_header, get_test_app_state, insert_unreadable_row,
            parse_html_document,
        },
        transaction::Transaction,
    };

    fn transaction(amount: f64, description: &str) -> Transaction {
        Transaction {
            date: date!(2025 - 07 - 09),
            category: Category::FoodAndGroceries,
            amount: Amount::new(amount).unwrap(),
            description: description.to_owned(),
            transaction_type: TransactionType::Expense,
            user: "default_user".to_owned(),
        }
    }

    #[test]
    fn has_header_and_one_line_per_transaction() {
        for count in [0, 1, 7] {
            let transactions: Vec<_> = (0..count)
                .map(|i| transaction(i as f64 + 1.0, "Shop"))
                .collect();

            let csv = transactions_to_csv(&transactions).unwrap();

            assert_eq!(csv.lines().count(), count + 1);
            assert_eq!(
                csv.lines().next(),
                Some("Date,Category,Amount,Description,Type,User")
            );
        }
    }

    #[test]
    fn writes_columns_in_order() {
        let csv = transactions_to_csv(&[transaction(100.0, "Weekly shop")]).unwrap();

        assert_eq!(
            csv,
            "Date,Category,Amount,Description,Type,User\n\
            2025-07-09,Food & Groceries,100.0,Weekly shop,Expense,default_user\n"
        );
    }

    #[test]
    fn quotes_descriptions_with_commas() {
        let csv = transactions_to_csv(&[transaction(12.5, "Milk, eggs")]).unwrap();

        assert_eq!(
            csv.lines().nth(1),
            Some("2025-07-09,Food & Groceries,12.5,\"Milk, eggs\",Expense,default_user")
        );
    }

    #[tokio::test]
    async fn download_is_an_attachment() {
        let app_state = get_test_app_state();
        {
            let connection = app_state.db_connection.lock().unwrap();
            let mut session = app_state.session.lock().unwrap();
            session
                .ledger
                .append(transaction(20.0, "Lunch"), &connection)
                .unwrap();
        }
        let state = ExportState::from_ref(&app_state);

        let response = export_transactions_endpoint(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_header(&response, header::CONTENT_TYPE.as_str()), "text/csv");
        assert_eq!(
            get_header(&response, header::CONTENT_DISPOSITION.as_str()),
            "attachment; filename=\"personal_finance_data.csv\""
        );
    }

    #[tokio::test]
    async fn page_links_to_download() {
        let state = ExportState::from_ref(&get_test_app_state());

        let response = get_export_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert!(
            html.select(&Selector::parse("#page-alerts").unwrap())
                .next()
                .is_none()
        );
        let link = html
            .select(&Selector::parse("a#download-csv").unwrap())
            .next()
            .expect("could not find download link");
        assert_eq!(link.value().attr("href"), Some(endpoints::EXPORT_API));
    }

    fn state_with_unloadable_ledger() -> ExportState {
        let app_state = get_test_app_state();
        {
            let connection = app_state.db_connection.lock().unwrap();
            let mut session = app_state.session.lock().unwrap();
            insert_unreadable_row(&connection);
            assert!(session.ledger.reload(&connection).is_err());
        }

        ExportState::from_ref(&app_state)
    }

    #[tokio::test]
    async fn page_shows_error_when_ledger_cannot_be_loaded() {
        let response = get_export_page(State(state_with_unloadable_ledger()))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert!(html.html().contains("Could not load transactions."));
    }

    #[tokio::test]
    async fn download_fails_when_ledger_cannot_be_loaded() {
        let result = export_transactions_endpoint(State(state_with_unloadable_ledger())).await;

        assert!(matches!(result, Err(Error::LedgerUnavailable(_))));
    }
}
