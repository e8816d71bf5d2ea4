//! Defines the transaction record and the database queries for the transactions table.

use rusqlite::{Connection, Row};
use time::Date;

use crate::{
    Error,
    domain::{Amount, Category, TransactionType},
};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// When the transaction happened.
    pub date: Date,
    /// What the money was spent on or earned from.
    pub category: Category,
    /// How much money was spent or earned. Whether it is income or an
    /// expense is given by `transaction_type`.
    pub amount: Amount,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Whether money came in or went out.
    pub transaction_type: TransactionType,
    /// The user that recorded the transaction.
    pub user: String,
}

impl Transaction {
    /// Whether this transaction is an expense.
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Append `transaction` to the transactions table.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn insert_transaction(transaction: &Transaction, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO transactions (Date, Category, Amount, Description, Type, User)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        (
            transaction.date,
            transaction.category,
            transaction.amount,
            &transaction.description,
            transaction.transaction_type,
            &transaction.user,
        ),
    )?;

    Ok(())
}

/// Get every stored transaction in the order they were recorded.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error,
/// including when a row holds a category or type outside the known labels.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT Date, Category, Amount, Description, Type, User
             FROM transactions ORDER BY rowid ASC",
        )?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Create the transactions table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                Date TEXT NOT NULL,
                Category TEXT NOT NULL,
                Amount REAL NOT NULL,
                Description TEXT NOT NULL,
                Type TEXT NOT NULL,
                User TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        date: row.get(0)?,
        category: row.get(1)?,
        amount: row.get(2)?,
        description: row.get(3)?,
        transaction_type: row.get(4)?,
        user: row.get(5)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
