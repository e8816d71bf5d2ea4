//! The in-memory snapshot of the transactions table.

use rusqlite::Connection;

use crate::{
    Error,
    transaction::{Transaction, get_all_transactions, insert_transaction},
};

/// Every stored transaction, in the order they were recorded.
///
/// The snapshot is never patched in place: each write is followed by a full
/// reload from the database, so the ledger always mirrors the table.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    /// Why the last load failed. Cleared by the next successful reload.
    load_error: Option<String>,
}

impl Ledger {
    /// Load the ledger from the database.
    ///
    /// If the transactions cannot be read the ledger starts out empty and
    /// [Ledger::try_transactions] reports the failure.
    pub fn load(connection: &Connection) -> Self {
        let mut ledger = Self::default();
        // reload logs the error and keeps it on the ledger.
        let _ = ledger.reload(connection);
        ledger
    }

    /// Store `transaction` and then reload the whole ledger.
    ///
    /// # Errors
    /// Returns the insert error if `transaction` could not be stored, in which
    /// case the snapshot is left as it was.
    ///
    /// Returns [Error::LedgerReloadFailed] if `transaction` was stored but the
    /// reload failed. The snapshot is then empty and [Ledger::try_transactions]
    /// reports the failure.
    pub fn append(&mut self, transaction: Transaction, connection: &Connection) -> Result<(), Error> {
        insert_transaction(&transaction, connection)?;

        self.reload(connection)
            .map_err(|error| Error::LedgerReloadFailed(error.to_string()))
    }

    /// Replace the snapshot with the current contents of the transactions table.
    ///
    /// # Errors
    /// Returns an error if the transactions cannot be read. The snapshot is
    /// emptied rather than left stale, and the failure is kept until the next
    /// successful reload.
    pub fn reload(&mut self, connection: &Connection) -> Result<(), Error> {
        match get_all_transactions(connection) {
            Ok(transactions) => {
                self.transactions = transactions;
                self.load_error = None;
                Ok(())
            }
            Err(error) => {
                tracing::error!("could not reload transactions, clearing the ledger: {error}");
                self.transactions.clear();
                self.load_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// The snapshot, or [Error::LedgerUnavailable] if the last load failed.
    ///
    /// Use this where an empty ledger would be mistaken for having no
    /// transactions.
    pub fn try_transactions(&self) -> Result<&[Transaction], Error> {
        match &self.load_error {
            Some(error) => Err(Error::LedgerUnavailable(error.clone())),
            None => Ok(&self.transactions),
        }
    }

}

#[cfg(test)]
impl Ledger {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
