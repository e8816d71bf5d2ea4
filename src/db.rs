//! Creates the application's SQLite schema.

use rusqlite::Connection;

use crate::{
    Error, automated_payment::create_automated_payment_table, budget::create_budget_table,
    loan::create_loan_table, savings::create_savings_goal_table,
    transaction::create_transaction_table,
};

/// Create all the application tables if they do not exist yet.
///
/// Safe to call on an existing database: rows already stored are kept.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    create_transaction_table(&transaction)?;
    create_budget_table(&transaction)?;
    create_savings_goal_table(&transaction)?;
    create_automated_payment_table(&transaction)?;
    create_loan_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
