//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    error_page::{InternalServerError, NotFoundError},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction, automated payment or loan was given an amount less
    /// than one cent.
    #[error("{0} is not a valid amount, amounts must be at least 0.01")]
    AmountBelowMinimum(f64),

    /// A budget allocation or savings goal was given a negative amount.
    #[error("{0} is negative, which is not allowed")]
    NegativeAmount(f64),

    /// A budget form referred to a category that cannot be budgeted for.
    #[error("\"{0}\" is not a budget category")]
    UnknownBudgetCategory(String),

    /// A label could not be parsed as one of the fixed enumerations, e.g.
    /// a category or transaction type.
    #[error("\"{0}\" is not a valid {1}")]
    InvalidLabel(String, &'static str),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The transactions could not be loaded, so the ledger is empty until the
    /// next successful reload.
    #[error("the transactions could not be loaded: {0}")]
    LedgerUnavailable(String),

    /// A transaction was stored, but reloading the ledger afterwards failed.
    #[error("the transaction was saved but the transactions could not be reloaded: {0}")]
    LedgerReloadFailed(String),

    /// The loan was saved, but the matching expense transaction could not be
    /// recorded. The loans table and the ledger now disagree.
    #[error("the loan \"{0}\" was saved but could not be recorded as an expense")]
    LoanExpenseNotRecorded(String),

    /// The transactions could not be written as CSV.
    #[error("could not export transactions as CSV: {0}")]
    CsvExportError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Could not acquire the session lock
    #[error("could not acquire the session lock")]
    SessionLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CsvExportError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError | Error::SessionLockError => {
                InternalServerError::default().into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::AmountBelowMinimum(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: format!(
                        "{amount} is not a valid amount. Enter an amount of at least $0.01."
                    ),
                },
            ),
            Error::NegativeAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: format!("{amount} is negative. Enter an amount of $0.00 or more."),
                },
            ),
            Error::UnknownBudgetCategory(category) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid budget category".to_owned(),
                    details: format!("\"{category}\" cannot be budgeted for."),
                },
            ),
            Error::InvalidLabel(label, kind) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: format!("Invalid {kind}"),
                    details: format!("\"{label}\" is not a valid {kind}."),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::LoanExpenseNotRecorded(name) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Loan saved, expense not recorded".to_owned(),
                    details: format!(
                        "The loan \"{name}\" was saved, but it could not be added to your \
                        transactions. Add the expense manually on the transactions page."
                    ),
                },
            ),
            Error::SqlError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Could not save your changes".to_owned(),
                    details: "An error occurred while writing to the database, \
                        check the server logs for more details."
                        .to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::Error;

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let cases = [
            Error::AmountBelowMinimum(0.0),
            Error::AmountBelowMinimum(0.001),
            Error::NegativeAmount(-1.0),
            Error::UnknownBudgetCategory("Salary".to_owned()),
            Error::InvalidLabel("Monthlyish".to_owned(), "frequency"),
        ];

        for error in cases {
            let response = error.into_alert_response();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn partial_loan_failure_is_server_error() {
        let response = Error::LoanExpenseNotRecorded("Car".to_owned()).into_alert_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
