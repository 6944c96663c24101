#![deny(rust_2018_idioms)]
//! This crate defines the client driver interfaces

use std::error::Error;

pub use fallible_iterator::{self, FallibleIterator};
use recsql_core::{Name, Row, Value};

/// Entry point of a driver: hands out connections bound to a name.
pub trait Driver: Clone + Send + Sync + Sized + 'static {
    type Error: Send + Sync + Error + 'static;

    type Connection: Connection<Self>;

    fn connect(&self, name: &str) -> Result<Self::Connection, Self::Error>;
}

pub trait Connection<D: Driver>: Sized {
    type Statement: Statement<D>;

    type Transaction: Transaction<D>;

    /// Prepare a statement bound to this connection.
    fn prepare(&self, query: &str) -> Result<Self::Statement, D::Error>;

    fn begin(&self) -> Result<Self::Transaction, D::Error>;

    fn close(self) -> Result<(), D::Error>;
}

pub trait Statement<D: Driver>: Sized {
    type Rows: Rows<Error = D::Error>;

    /// The number of placeholder parameters the statement expects, if the
    /// driver knows it.
    fn param_count(&self) -> Option<usize>;

    /// Execute a statement that returns no rows, such as DDL or DML.
    fn execute(&mut self, params: &[Value]) -> Result<ExecSummary, D::Error>;

    /// Execute a statement that may return rows, such as a SELECT.
    fn query(&mut self, params: &[Value]) -> Result<Self::Rows, D::Error>;

    fn close(self) -> Result<(), D::Error>;
}

/// A stream of rows produced by a query.
///
/// Exhaustion is signalled by `Ok(None)` from the iterator, never by an
/// error.
pub trait Rows: FallibleIterator<Item = Row> {
    /// Column names of the result set, stable across reads.
    fn columns(&self) -> &[Name];

    fn close(self) -> Result<(), Self::Error>
    where
        Self: Sized;
}

pub trait Transaction<D: Driver>: Sized {
    fn commit(self) -> Result<(), D::Error>;

    fn rollback(self) -> Result<(), D::Error>;
}

/// Summary returned by a statement execution that produced no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecSummary {
    pub last_insert_id: i64,
    pub rows_affected: u64,
}
