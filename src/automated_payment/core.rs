//! Defines the automated payment record and the queries for the automated_payments table.

use rusqlite::{Connection, Row};
use time::Date;

use crate::{
    Error,
    domain::{Amount, Frequency},
};

/// A recurring payment, e.g. rent or a subscription.
///
/// Nothing is paid automatically. The payments are only listed and their
/// amounts set aside when calculating savings.
#[derive(Debug, Clone, PartialEq)]
pub struct AutomatedPayment {
    /// What the payment is for, e.g. "Rent".
    pub name: String,
    /// How much is paid each time.
    pub amount: Amount,
    /// How often the payment is made.
    pub frequency: Frequency,
    /// When the payment is next due.
    pub next_payment_date: Date,
    /// The user that recorded the payment.
    pub user: String,
}

/// Append `payment` to the automated_payments table.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn insert_automated_payment(
    payment: &AutomatedPayment,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO automated_payments (Name, Amount, Frequency, NextPaymentDate, User)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            &payment.name,
            payment.amount,
            payment.frequency,
            payment.next_payment_date,
            &payment.user,
        ),
    )?;

    Ok(())
}

/// Get every automated payment in the order they were added.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_automated_payments(connection: &Connection) -> Result<Vec<AutomatedPayment>, Error> {
    connection
        .prepare(
            "SELECT Name, Amount, Frequency, NextPaymentDate, User
             FROM automated_payments ORDER BY rowid ASC",
        )?
        .query_map([], map_automated_payment_row)?
        .map(|maybe_payment| maybe_payment.map_err(Error::from))
        .collect()
}

/// The sum of the amounts of `payments`, ignoring how often each is paid.
pub fn total_automated_payments(payments: &[AutomatedPayment]) -> f64 {
    payments.iter().map(|payment| payment.amount.as_f64()).sum()
}

/// Create the automated_payments table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_automated_payment_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS automated_payments (
                Name TEXT NOT NULL,
                Amount REAL NOT NULL,
                Frequency TEXT NOT NULL,
                NextPaymentDate TEXT NOT NULL,
                User TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

fn map_automated_payment_row(row: &Row) -> Result<AutomatedPayment, rusqlite::Error> {
    Ok(AutomatedPayment {
        name: row.get(0)?,
        amount: row.get(1)?,
        frequency: row.get(2)?,
        next_payment_date: row.get(3)?,
        user: row.get(4)?,
    })
}
