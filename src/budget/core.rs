//! Budget allocations and the queries for the budget table.

use std::collections::HashMap;

use rusqlite::Connection;

use crate::{
    Error,
    domain::{Category, non_negative},
};

/// Parse the raw budget form, keyed by category label, into allocations.
///
/// # Errors
/// Returns [Error::UnknownBudgetCategory] if a key is not a budget category
/// and [Error::NegativeAmount] if an allocation is negative.
pub fn parse_budget_form(form: HashMap<String, f64>) -> Result<HashMap<Category, f64>, Error> {
    form.into_iter()
        .map(|(label, amount)| {
            let category = label
                .parse::<Category>()
                .ok()
                .filter(Category::is_budgeted)
                .ok_or(Error::UnknownBudgetCategory(label))?;

            Ok((category, non_negative(amount)?))
        })
        .collect()
}

/// Save the allocations in `budget`, replacing any stored value for the
/// same category. Categories not in `budget` keep their stored value.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn save_budget(budget: &HashMap<Category, f64>, connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    {
        let mut statement =
            transaction.prepare("INSERT OR REPLACE INTO budget (Category, Amount) VALUES (?1, ?2)")?;

        for (category, amount) in budget {
            statement.execute((category, amount))?;
        }
    }

    transaction.commit()?;

    Ok(())
}

/// Get the allocation for every budget category, zero where none was saved.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error,
/// including when a stored category is not a known label.
pub fn get_budget(connection: &Connection) -> Result<HashMap<Category, f64>, Error> {
    let mut budget: HashMap<Category, f64> = Category::BUDGETED
        .iter()
        .map(|category| (*category, 0.0))
        .collect();

    let stored = connection
        .prepare("SELECT Category, Amount FROM budget")?
        .query_map([], |row| Ok((row.get::<_, Category>(0)?, row.get::<_, f64>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    budget.extend(stored);

    Ok(budget)
}

/// Create the budget table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
                Category TEXT PRIMARY KEY,
                Amount REAL NOT NULL
                )",
        (),
    )?;

    Ok(())
}
