//! Defines the loan record and the queries for the loans table.

use rusqlite::{Connection, Row};
use time::Date;

use crate::{
    Error,
    domain::{Amount, Category, LoanType, TransactionType},
    transaction::Transaction,
};

/// Money lent to or borrowed from someone.
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    /// Who or what the loan is for.
    pub name: String,
    /// How much was lent or borrowed.
    pub amount: Amount,
    /// Whether the money was lent or borrowed.
    pub loan_type: LoanType,
    /// When the loan should be paid back.
    pub due_date: Date,
    /// The user that recorded the loan.
    pub user: String,
}

impl Loan {
    /// The expense recorded on `today` when money is lent out.
    ///
    /// # Returns
    /// `None` for loans taken, which are not recorded as transactions.
    pub fn as_expense(&self, today: Date) -> Option<Transaction> {
        match self.loan_type {
            LoanType::Given => Some(Transaction {
                date: today,
                category: Category::Other,
                amount: self.amount,
                description: format!("Loan Given: {}", self.name),
                transaction_type: TransactionType::Expense,
                user: self.user.clone(),
            }),
            LoanType::Taken => None,
        }
    }
}

/// Append `loan` to the loans table.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn insert_loan(loan: &Loan, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO loans (Name, Amount, Type, DueDate, User) VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            &loan.name,
            loan.amount,
            loan.loan_type,
            loan.due_date,
            &loan.user,
        ),
    )?;

    Ok(())
}

/// Get every loan in the order they were added.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_loans(connection: &Connection) -> Result<Vec<Loan>, Error> {
    connection
        .prepare("SELECT Name, Amount, Type, DueDate, User FROM loans ORDER BY rowid ASC")?
        .query_map([], map_loan_row)?
        .map(|maybe_loan| maybe_loan.map_err(Error::from))
        .collect()
}

/// Create the loans table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_loan_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS loans (
                Name TEXT NOT NULL,
                Amount REAL NOT NULL,
                Type TEXT NOT NULL,
                DueDate TEXT NOT NULL,
                User TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

fn map_loan_row(row: &Row) -> Result<Loan, rusqlite::Error> {
    Ok(Loan {
        name: row.get(0)?,
        amount: row.get(1)?,
        loan_type: row.get(2)?,
        due_date: row.get(3)?,
        user: row.get(4)?,
    })
}
