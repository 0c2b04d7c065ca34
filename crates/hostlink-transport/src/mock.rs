//! In-memory connector for tests.
//!
//! [`MockConnector`] serves canned bodies keyed by path and records every
//! request, so tests can assert how many logins or lookups happened
//! without touching the network. Clones share state: keep one handle in
//! the test and hand the other to the code under test.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::{ConnectionId, Connector, HttpConnection, TransportError};

static NEXT_MOCK_ID: AtomicU64 = AtomicU64::new(1);

/// What a mocked path answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A 2xx response carrying this body.
    Body(String),
    /// The request fails with this error.
    Error(TransportError),
}

/// One request seen by a [`MockConnection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub connection: ConnectionId,
    pub method: &'static str,
    pub path: String,
    pub form: Vec<(String, String)>,
}

#[derive(Default)]
struct Shared {
    // The last reply of each queue is sticky.
    routes: HashMap<String, VecDeque<MockReply>>,
    requests: Vec<RecordedRequest>,
    connections: usize,
}

/// A [`Connector`] that answers from an in-memory route table.
#[derive(Clone, Default)]
pub struct MockConnector {
    shared: Arc<Mutex<Shared>>,
    latency: Duration,
}

impl MockConnector {
    /// Creates a connector with no routes. Unknown paths answer 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every request by `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Answers `path` with `body` from now on.
    pub fn respond(&self, path: &str, body: impl Into<String>) -> &Self {
        self.set(path, vec![MockReply::Body(body.into())])
    }

    /// Answers `path` with each body in turn, repeating the last one.
    pub fn respond_sequence<I, S>(&self, path: &str, bodies: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let replies =
            bodies.into_iter().map(|b| MockReply::Body(b.into())).collect();
        self.set(path, replies)
    }

    /// Makes every request to `path` fail with `error`.
    pub fn fail(&self, path: &str, error: TransportError) -> &Self {
        self.set(path, vec![MockReply::Error(error)])
    }

    /// Number of requests made to `path` (any method).
    pub fn hits(&self, path: &str) -> usize {
        self.lock().requests.iter().filter(|r| r.path == path).count()
    }

    /// Number of connections opened so far.
    pub fn connections(&self) -> usize {
        self.lock().connections
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    fn set(&self, path: &str, replies: Vec<MockReply>) -> &Self {
        self.lock().routes.insert(path.to_string(), replies.into());
        self
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Connector for MockConnector {
    type Connection = MockConnection;

    fn connect(&self) -> Result<Self::Connection, TransportError> {
        self.lock().connections += 1;
        Ok(MockConnection {
            id: ConnectionId::new(NEXT_MOCK_ID.fetch_add(1, Ordering::Relaxed)),
            connector: self.clone(),
        })
    }
}

/// A connection handed out by [`MockConnector`].
pub struct MockConnection {
    id: ConnectionId,
    connector: MockConnector,
}

impl MockConnection {
    async fn answer(
        &self,
        method: &'static str,
        path: &str,
        form: Vec<(String, String)>,
    ) -> Result<String, TransportError> {
        if !self.connector.latency.is_zero() {
            tokio::time::sleep(self.connector.latency).await;
        }

        let reply = {
            let mut shared = self.connector.lock();
            shared.requests.push(RecordedRequest {
                connection: self.id,
                method,
                path: path.to_string(),
                form,
            });
            shared.routes.get_mut(path).and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            })
        };

        match reply {
            Some(MockReply::Body(body)) => Ok(body),
            Some(MockReply::Error(err)) => Err(err),
            None => Err(TransportError::Status {
                url: path.to_string(),
                status: 404,
            }),
        }
    }
}

impl HttpConnection for MockConnection {
    async fn get(&self, path: &str) -> Result<String, TransportError> {
        self.answer("GET", path, Vec::new()).await
    }

    async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<String, TransportError> {
        let form = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.answer("POST", path, form).await
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
