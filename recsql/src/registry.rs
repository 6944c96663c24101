use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use recsql_core::Name;

use crate::driver::RecordDriver;
use crate::response::{RecordedRows, Response, SharedResponse};

/// The table of recording sessions, keyed by connection name.
///
/// A `Registry` is an explicitly constructed value owned by the test
/// harness; cloning it yields another handle to the same table. All access
/// is serialized under one lock, so operations on different sessions
/// serialize against each other as well.
#[derive(Clone)]
pub struct Registry {
    sessions: Arc<Mutex<HashMap<Name, Session>>>,
}

/// Recording state for one connection name.
///
/// Logs are append-only for the session's lifetime; nothing is removed
/// until the whole session is deleted.
#[derive(Default)]
struct Session {
    queries: Vec<String>,
    statements: Vec<String>,
    responses: HashMap<String, SharedResponse>,
}

impl Registry {
    pub fn new() -> Self {
        Self { sessions: Arc::new(Mutex::new(HashMap::new())) }
    }

    /// A driver facade recording into this registry, to hand to the code
    /// under test.
    #[inline]
    pub fn driver(&self) -> RecordDriver {
        RecordDriver::new(self.clone())
    }

    /// Registers the canned response returned when `query` is executed in
    /// `session`, overwriting any previous registration for that exact
    /// string. Creates the session if it does not exist yet.
    pub fn set_response(&self, session: &str, query: &str, response: Response) {
        tracing::debug!(session, query, "registering canned response");
        let mut sessions = self.sessions.lock();
        let session = sessions.entry(Name::new(session)).or_default();
        session.responses.insert(query.to_owned(), response.into_shared());
    }

    /// Looks up the session recorded under `name`, without creating one.
    pub fn session(&self, name: &str) -> Option<SessionHandle> {
        let sessions = self.sessions.lock();
        sessions
            .contains_key(name)
            .then(|| SessionHandle { registry: self.clone(), name: Name::new(name) })
    }

    /// Creates the session for `name` if it does not exist yet.
    pub(crate) fn ensure_session(&self, name: &str) {
        let mut sessions = self.sessions.lock();
        sessions.entry(Name::new(name)).or_insert_with(|| {
            tracing::debug!(session = name, "creating recording session");
            Session::default()
        });
    }

    /// Removes the session for `name`; a no-op if it does not exist.
    pub(crate) fn delete_session(&self, name: &str) {
        tracing::debug!(session = name, "deleting recording session");
        let mut sessions = self.sessions.lock();
        sessions.remove(name);
    }

    pub(crate) fn record_statement(&self, session: &str, query: &str) {
        tracing::debug!(session, query, "recording statement");
        let mut sessions = self.sessions.lock();
        let session =
            sessions.get_mut(session).expect("recording against a session that was never opened");
        session.statements.push(query.to_owned());
    }

    /// Appends `query` to the session's query log and resolves it against
    /// the registered responses by exact string match. A miss yields a
    /// fresh empty result set; a hit yields a stream over the one
    /// registered instance, which is drained in place across executions.
    pub(crate) fn record_query(&self, session: &str, query: &str) -> RecordedRows {
        tracing::debug!(session, query, "recording query");
        let mut sessions = self.sessions.lock();
        let session =
            sessions.get_mut(session).expect("recording against a session that was never opened");
        session.queries.push(query.to_owned());
        match session.responses.get(query) {
            Some(response) => RecordedRows::new(Arc::clone(response)),
            None => RecordedRows::empty(),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of one session's recorded history, for assertions.
///
/// Each accessor re-reads the registry; a handle whose session has since
/// been deleted observes empty logs.
#[derive(Clone)]
pub struct SessionHandle {
    registry: Registry,
    name: Name,
}

impl SessionHandle {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The query texts executed in this session, in execution order.
    pub fn queries(&self) -> Vec<String> {
        let sessions = self.registry.sessions.lock();
        sessions.get(&self.name).map(|session| session.queries.clone()).unwrap_or_default()
    }

    /// The non-query statement texts executed in this session, in
    /// execution order.
    pub fn statements(&self) -> Vec<String> {
        let sessions = self.registry.sessions.lock();
        sessions.get(&self.name).map(|session| session.statements.clone()).unwrap_or_default()
    }

    /// The recorded statements rendered as a script, one `<stmt>;` per
    /// line.
    pub fn script(&self) -> String {
        let mut script = String::new();
        for stmt in self.statements() {
            script.push_str(&stmt);
            script.push_str(";\n");
        }
        script
    }
}
