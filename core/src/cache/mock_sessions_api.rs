use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use crate::api::{Error, RemoteSession, SessionsApi};

// Scripted backend: answers calls from a queue, optionally holding the next call until released
pub(super) struct MockSessionsApi {
    responses: Mutex<VecDeque<Result<Vec<RemoteSession>, Error>>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    calls: AtomicUsize,
    requested_users: Mutex<Vec<String>>,
}

impl MockSessionsApi {
    pub fn new(responses: Vec<Result<Vec<RemoteSession>, Error>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            gate: Mutex::new(None),
            calls: AtomicUsize::new(0),
            requested_users: Mutex::new(Vec::new()),
        }
    }

    /// Holds the next call until the returned sender fires (or is dropped).
    pub fn hold_next_call(&self) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(gate);
        release
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested_users(&self) -> Vec<String> {
        self.requested_users.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionsApi for MockSessionsApi {
    async fn list_sessions(&self, user_id: &str) -> Result<Vec<RemoteSession>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested_users.lock().unwrap().push(user_id.to_string());

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other(anyhow::anyhow!("no scripted response"))))
    }
}

pub(super) fn remote(id: &str, name: &str, created_at: &str) -> RemoteSession {
    RemoteSession {
        id: id.to_string(),
        name: name.to_string(),
        created_at: created_at.parse::<DateTime<Utc>>().unwrap(),
    }
}
