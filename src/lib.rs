//! Finance Manager is a single-user web app for tracking personal finances.
//!
//! It records income and expenses, budgets per category, a savings goal,
//! recurring payments and loans, and serves HTML pages summarising them.
//! Everything is stored in a local SQLite database.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod aggregation;
mod alert;
mod app_state;
mod automated_payment;
mod budget;
mod charts;
mod dashboard;
mod db;
mod domain;
mod endpoints;
mod error;
mod error_page;
mod export;
mod html;
mod loan;
mod logging;
mod navigation;
mod routing;
mod savings;
mod session;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use automated_payment::{AutomatedPayment, insert_automated_payment};
pub use budget::save_budget;
pub use db::initialize as initialize_db;
pub use domain::{Amount, Category, Frequency, LoanType, TransactionType};
pub use error::Error;
pub use loan::{Loan, insert_loan};
pub use logging::logging_middleware;
pub use routing::build_router;
pub use savings::save_savings_goal;
pub use transaction::{Transaction, insert_transaction};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
