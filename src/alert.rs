//! Alert system for displaying success, warning and error messages to users.
//!
//! Alerts are used in two places:
//! - as the response body of a failed htmx form submission, swapped into the
//!   page's alert container,
//! - inline on a page, e.g. to confirm that a form was saved or to report that
//!   some data could not be loaded.

use maud::{Markup, html};
use serde::Deserialize;

use crate::Error;

/// A message to show the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Something the user asked for worked.
    Success { message: String, details: String },
    /// Something needs the user's attention, but nothing failed.
    Warning { message: String, details: String },
    /// Something went wrong.
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message, details } => (
                "text-green-800 border-green-300 bg-green-50 \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800",
                message,
                details,
            ),
            Alert::Warning { message, details } => (
                "text-yellow-800 border-yellow-300 bg-yellow-50 \
                dark:bg-gray-800 dark:text-yellow-300 dark:border-yellow-800",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "text-red-800 border-red-300 bg-red-50 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                message,
                details,
            ),
        };

        // Template adapted from https://flowbite.com/docs/components/alerts/
        html!(
            div
                role="alert"
                class={"w-full p-4 mb-4 text-sm border rounded-lg " (container_style)}
            {
                span class="font-medium" { (message) }

                @if !details.is_empty() {
                    " " (details)
                }
            }
        )
    }
}

/// Renders the alerts shown at the top of a page, e.g. a save confirmation.
pub fn page_alerts(alerts: Vec<Alert>) -> Markup {
    html!(
        @if !alerts.is_empty() {
            div id="page-alerts" class="w-full max-w-screen-md" {
                @for alert in alerts {
                    (alert.into_html())
                }
            }
        }
    )
}

/// The confirmation to show after a form was saved and the page reloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    TransactionAdded,
    BudgetSaved,
    SavingsGoalUpdated,
    AutomatedPaymentAdded,
    LoanAdded,
    LoanRecordedAsExpense,
}

impl Confirmation {
    /// The query string value for this confirmation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Confirmation::TransactionAdded => "transaction_added",
            Confirmation::BudgetSaved => "budget_saved",
            Confirmation::SavingsGoalUpdated => "savings_goal_updated",
            Confirmation::AutomatedPaymentAdded => "automated_payment_added",
            Confirmation::LoanAdded => "loan_added",
            Confirmation::LoanRecordedAsExpense => "loan_recorded_as_expense",
        }
    }

    /// The URL of `page` that displays this confirmation.
    pub fn redirect_url(&self, page: &str) -> String {
        format!("{page}?confirmation={}", self.as_str())
    }

    pub fn into_alert(self) -> Alert {
        let message = match self {
            Confirmation::TransactionAdded => "Transaction added successfully!",
            Confirmation::BudgetSaved => "Budget saved successfully!",
            Confirmation::SavingsGoalUpdated => "Savings goal updated successfully!",
            Confirmation::AutomatedPaymentAdded => "Automated payment added successfully!",
            Confirmation::LoanAdded => "Loan added successfully!",
            Confirmation::LoanRecordedAsExpense => {
                "Loan added and recorded as an expense in transactions!"
            }
        };

        Alert::Success {
            message: message.to_owned(),
            details: String::new(),
        }
    }
}

/// The query parameters a page accepts to display a confirmation.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmationQuery {
    pub confirmation: Option<Confirmation>,
}

impl ConfirmationQuery {
    pub fn into_alert(self) -> Option<Alert> {
        self.confirmation.map(Confirmation::into_alert)
    }
}

/// Use the value in `result`, or fall back to the default value and an error
/// alert describing what could not be loaded.
///
/// Pages use this so that a failed query shows an empty table and a notice
/// instead of an error page.
pub fn or_load_error<T: Default>(result: Result<T, Error>, what: &str) -> (T, Option<Alert>) {
    match result {
        Ok(value) => (value, None),
        Err(error) => {
            tracing::error!("could not load {what}: {error}");

            let alert = Alert::Error {
                message: format!("Could not load {what}."),
                details: "Check the server logs for more details.".to_owned(),
            };

            (T::default(), Some(alert))
        }
    }
}
