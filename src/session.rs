//! The per-process session: who is using the app and the data cached for them.

use rusqlite::Connection;

use crate::{savings::get_savings_goal, transaction::Ledger};

/// The state cached for the active user.
///
/// Built once at start up and shared by every handler through [crate::AppState].
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// The name recorded against every new row.
    pub user: String,
    /// Every stored transaction.
    pub ledger: Ledger,
    /// The user's savings goal in dollars, zero if they have not set one.
    pub savings_goal: f64,
}

impl Session {
    /// Start a session for `user`, loading the ledger and savings goal.
    ///
    /// Data that cannot be loaded starts out empty and the error is logged,
    /// so the app still starts when the database is in a bad state. A failed
    /// ledger load is also kept on the ledger for the pages to report.
    pub fn start(user: &str, connection: &Connection) -> Self {
        let ledger = Ledger::load(connection);

        let savings_goal = get_savings_goal(user, connection).unwrap_or_else(|error| {
            tracing::error!("could not load the savings goal for {user}: {error}");
            0.0
        });

        if let Ok(transactions) = ledger.try_transactions() {
            tracing::info!(
                "Started session for {user} with {} transactions",
                transactions.len()
            );
        }

        Self {
            user: user.to_owned(),
            ledger,
            savings_goal,
        }
    }
}
