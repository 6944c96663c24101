#![deny(rust_2018_idioms)]

//! An in-memory recording driver for tests: it captures every query and
//! statement executed through a connection and serves pre-registered canned
//! responses for exact query strings.

mod driver;
mod registry;
mod response;

use thiserror::Error;

pub use recsql_core::{Name, Row, SmolStr, Value};
pub use recsql_driver::{
    Connection, Driver, ExecSummary, FallibleIterator, Rows, Statement, Transaction,
};

pub use self::driver::{NoopTransaction, RecordConnection, RecordDriver, RecordStatement};
pub use self::registry::{Registry, SessionHandle};
pub use self::response::{RecordedRows, Response};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// No operation of the recording driver can fail: there is no I/O behind it,
/// and end-of-data during row iteration is `Ok(None)` rather than an error.
#[derive(Debug, Error)]
pub enum Error {}
