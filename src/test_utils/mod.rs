#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

use rusqlite::Connection;

use crate::AppState;

pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_submit_button_with_text,
    assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_content_type, assert_hx_redirect, get_header};

/// Store a transaction whose category is not a known label, so that any
/// later read of the transactions table fails.
pub(crate) fn insert_unreadable_row(connection: &Connection) {
    connection
        .execute(
            "INSERT INTO transactions (Date, Category, Amount, Description, Type, User)
             VALUES ('2025-01-01', 'Gambling', 10.0, 'Unreadable', 'Expense', 'default_user')",
            (),
        )
        .expect("Could not insert unreadable transaction");
}

/// App state backed by an empty in-memory database, with the session user
/// `default_user` in UTC.
pub(crate) fn get_test_app_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database");

    AppState::new(connection, "default_user", "Etc/UTC").expect("Could not create app state")
}
