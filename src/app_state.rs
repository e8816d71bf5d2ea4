//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, session::Session};

/// The state of the server.
///
/// Handlers that need both locks take `db_connection` first and `session`
/// second.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The active user and the data cached for them.
    pub session: Arc<Mutex<Session>>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models and then start a session for `user`.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, user: &str, local_timezone: &str) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let session = Session::start(user, &db_connection);

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            session: Arc::new(Mutex::new(session)),
            local_timezone: local_timezone.to_owned(),
        })
    }
}
