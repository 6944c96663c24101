use recsql_core::{Name, Value};
use recsql_driver::{Connection, Driver, ExecSummary, Statement, Transaction};

use crate::response::RecordedRows;
use crate::{Error, Registry};

/// The recording driver: every connection opened through it records into a
/// session of the registry it was built from.
#[derive(Clone)]
pub struct RecordDriver {
    registry: Registry,
}

impl RecordDriver {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }
}

impl Driver for RecordDriver {
    type Error = Error;

    type Connection = RecordConnection;

    #[inline]
    fn connect(&self, name: &str) -> Result<RecordConnection, Error> {
        self.registry.ensure_session(name);
        Ok(RecordConnection { registry: self.registry.clone(), session: Name::new(name) })
    }
}

/// A connection bound to one recording session.
pub struct RecordConnection {
    registry: Registry,
    session: Name,
}

impl Connection<RecordDriver> for RecordConnection {
    type Statement = RecordStatement;

    type Transaction = NoopTransaction;

    #[inline]
    fn prepare(&self, query: &str) -> Result<RecordStatement, Error> {
        Ok(RecordStatement {
            registry: self.registry.clone(),
            session: self.session.clone(),
            query: query.to_owned(),
        })
    }

    #[inline]
    fn begin(&self) -> Result<NoopTransaction, Error> {
        Ok(NoopTransaction)
    }

    /// Closing a connection deletes its session along with everything
    /// recorded in it.
    #[inline]
    fn close(self) -> Result<(), Error> {
        self.registry.delete_session(&self.session);
        Ok(())
    }
}

/// A prepared statement, bound to its connection's session and the literal
/// query text it was prepared with.
pub struct RecordStatement {
    registry: Registry,
    session: Name,
    query: String,
}

impl Statement<RecordDriver> for RecordStatement {
    type Rows = RecordedRows;

    /// The recording driver never inspects placeholders, so the parameter
    /// count is uniformly unknown.
    #[inline]
    fn param_count(&self) -> Option<usize> {
        None
    }

    #[inline]
    fn execute(&mut self, _params: &[Value]) -> Result<ExecSummary, Error> {
        self.registry.record_statement(&self.session, &self.query);
        Ok(ExecSummary::default())
    }

    /// Bound parameter values are accepted but ignored: dispatch matches
    /// only the literal query text.
    #[inline]
    fn query(&mut self, _params: &[Value]) -> Result<RecordedRows, Error> {
        Ok(self.registry.record_query(&self.session, &self.query))
    }

    #[inline]
    fn close(self) -> Result<(), Error> {
        Ok(())
    }
}

/// Transactions are accepted syntactically but never affect recorded state.
pub struct NoopTransaction;

impl Transaction<RecordDriver> for NoopTransaction {
    #[inline]
    fn commit(self) -> Result<(), Error> {
        Ok(())
    }

    #[inline]
    fn rollback(self) -> Result<(), Error> {
        Ok(())
    }
}
