use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use recsql_core::{Name, Row};
use recsql_driver::{FallibleIterator, Rows};

use crate::Error;

/// A canned result set to register for a query string: column names plus
/// the rows to stream back, in order.
///
/// Row width is assumed to equal `cols.len()`; the recording driver does
/// not validate it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    pub cols: Vec<Name>,
    pub rows: Vec<Row>,
}

impl Response {
    pub fn new<C>(cols: C, rows: Vec<Row>) -> Self
    where
        C: IntoIterator,
        C::Item: Into<Name>,
    {
        Self { cols: cols.into_iter().map(Into::into).collect(), rows }
    }

    pub(crate) fn into_shared(self) -> SharedResponse {
        Arc::new(ResponseState {
            cols: self.cols,
            rows: Mutex::new(VecDeque::from(self.rows)),
        })
    }
}

/// A registered response. The columns are fixed at registration; the rows
/// are drained in place, so every stream handed out for the same query
/// string consumes from the one registered instance.
pub(crate) type SharedResponse = Arc<ResponseState>;

#[derive(Default)]
pub(crate) struct ResponseState {
    cols: Vec<Name>,
    rows: Mutex<VecDeque<Row>>,
}

/// The row stream returned by the recording driver for an executed query.
///
/// Consumption is destructive and one-pass: a popped row cannot be re-read,
/// and there is no reset short of registering a new response. Reading is
/// single-consumer by convention; the queue lock below only keeps
/// concurrent pops memory-safe, it does not make interleaved readers
/// meaningful.
pub struct RecordedRows {
    state: SharedResponse,
}

impl RecordedRows {
    pub(crate) fn new(state: SharedResponse) -> Self {
        Self { state }
    }

    /// The result set for an unregistered query: zero columns, immediately
    /// exhausted.
    pub(crate) fn empty() -> Self {
        Self::new(Arc::new(ResponseState::default()))
    }
}

impl FallibleIterator for RecordedRows {
    type Item = Row;
    type Error = Error;

    #[inline]
    fn next(&mut self) -> Result<Option<Row>, Error> {
        Ok(self.state.rows.lock().pop_front())
    }
}

impl Rows for RecordedRows {
    #[inline]
    fn columns(&self) -> &[Name] {
        &self.state.cols
    }

    #[inline]
    fn close(self) -> Result<(), Error> {
        Ok(())
    }
}
