//! The queries for the savings_goal table, which holds one goal per user.

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

/// Save `goal` as the savings goal of `user`, replacing any previous goal.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn save_savings_goal(user: &str, goal: f64, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT OR REPLACE INTO savings_goal (User, Goal) VALUES (?1, ?2)",
        (user, goal),
    )?;

    Ok(())
}

/// Get the savings goal of `user`, zero if they have not set one.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_savings_goal(user: &str, connection: &Connection) -> Result<f64, Error> {
    let goal = connection
        .query_row(
            "SELECT Goal FROM savings_goal WHERE User = ?1",
            [user],
            |row| row.get(0),
        )
        .optional()?;

    Ok(goal.unwrap_or(0.0))
}

/// Create the savings_goal table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_savings_goal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS savings_goal (
                User TEXT PRIMARY KEY,
                Goal REAL NOT NULL
                )",
        (),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        savings::{get_savings_goal, save_savings_goal},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn missing_goal_is_zero() {
        let conn = get_test_connection();

        assert_eq!(get_savings_goal("default_user", &conn), Ok(0.0));
    }

    #[test]
    fn saving_replaces_goal() {
        let conn = get_test_connection();

        save_savings_goal("default_user", 1000.0, &conn).unwrap();
        save_savings_goal("default_user", 2500.0, &conn).unwrap();

        assert_eq!(get_savings_goal("default_user", &conn), Ok(2500.0));
    }

    #[test]
    fn goals_are_per_user() {
        let conn = get_test_connection();

        save_savings_goal("alice", 300.0, &conn).unwrap();
        save_savings_goal("bob", 700.0, &conn).unwrap();

        assert_eq!(get_savings_goal("alice", &conn), Ok(300.0));
        assert_eq!(get_savings_goal("bob", &conn), Ok(700.0));
    }
}
