use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::api::{Error, SessionsApi};
use crate::cache::{to_summaries, CachePhase, CacheSnapshot, CacheView, SessionCacheStore, SessionSummary};
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;

type RefreshOutcome = Result<(), String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshReason {
    Initial,
    Background,
    Manual,
}

/// Everything that changes cache state goes through this channel, in order.
enum Command {
    Add {
        summary: SessionSummary,
        ack: oneshot::Sender<()>,
    },
    Remove {
        session_id: String,
        ack: oneshot::Sender<()>,
    },
    Refresh {
        reason: RefreshReason,
        ack: Option<oneshot::Sender<RefreshOutcome>>,
    },
    RefreshCompleted {
        result: Result<Vec<SessionSummary>, Error>,
    },
}

/// Keeps one user's session list available for rendering.
///
/// Activation serves a fresh persisted snapshot straight away and otherwise
/// fetches from the backend. The list is revalidated in the background once
/// `refresh_interval` has passed since it was last stamped. Local edits are
/// applied to memory and persisted at once, without waiting for the backend,
/// and restamp the list, which pushes the next revalidation back.
///
/// All state changes are applied by a single writer task in the order they
/// were issued. A refresh that completes after a local edit replaces the
/// edited list with whatever the backend returned.
///
/// Dropping the manager (or calling [`shutdown`](Self::shutdown)) stops the
/// writer; nothing is written to the store afterwards.
pub struct SessionCacheManager {
    user_id: String,
    commands: mpsc::UnboundedSender<Command>,
    view: watch::Receiver<CacheView>,
    cancel: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl SessionCacheManager {
    /// Activates a manager for `user_id`. Must be called from within a tokio runtime.
    pub fn activate<A>(
        user_id: impl Into<String>,
        store: Arc<SessionCacheStore>,
        api: Arc<A>,
        config: CacheConfig,
    ) -> Self
    where
        A: SessionsApi + ?Sized + 'static,
    {
        Self::activate_with_clock(user_id, store, api, config, SystemClock)
    }

    pub fn activate_with_clock<A, C>(
        user_id: impl Into<String>,
        store: Arc<SessionCacheStore>,
        api: Arc<A>,
        config: CacheConfig,
        clock: C,
    ) -> Self
    where
        A: SessionsApi + ?Sized + 'static,
        C: Clock,
    {
        let user_id = user_id.into();
        let cached = store.read(&user_id);

        let revalidate_every = if config.refresh_interval.is_zero() {
            warn!("Background revalidation disabled: refresh interval is zero");
            None
        } else {
            Some(config.refresh_interval)
        };

        let (initial, needs_fetch) = match cached {
            Some(snapshot) if snapshot.is_fresh(clock.now(), config.ttl) => {
                debug!("Serving cached session list for {} ({} entries)", user_id, snapshot.entries.len());
                let view = CacheView {
                    sessions: snapshot.entries,
                    phase: CachePhase::Ready,
                    last_refreshed_at: Some(snapshot.last_refreshed_at),
                    ..CacheView::default()
                };
                (view, false)
            }
            stale => {
                debug!("Session list for {} is {}, fetching", user_id, if stale.is_some() { "stale" } else { "not cached" });
                let view = CacheView {
                    last_refreshed_at: stale.as_ref().map(|s| s.last_refreshed_at),
                    sessions: stale.map(|s| s.entries).unwrap_or_default(),
                    phase: CachePhase::Refreshing,
                    is_loading: true,
                    ..CacheView::default()
                };
                (view, true)
            }
        };

        // A fresh snapshot falls due once its stamp is `refresh_interval` old.
        let next_revalidation = match (revalidate_every, needs_fetch, initial.last_refreshed_at) {
            (Some(period), false, Some(stamp)) => {
                let age = (clock.now() - stamp).to_std().unwrap_or_default();
                Some(Instant::now() + period.saturating_sub(age))
            }
            _ => None,
        };

        let (view_tx, view_rx) = watch::channel(initial.clone());
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let writer = Writer {
            user_id: user_id.clone(),
            store,
            api,
            clock,
            request_timeout: config.request_timeout,
            revalidate_every,
            next_revalidation,
            state: initial,
            view: view_tx,
            commands: commands_tx.clone(),
            cancel: cancel.clone(),
            refresh_in_flight: false,
            refresh_waiters: Vec::new(),
        };

        let tasks = vec![tokio::spawn(writer.run(commands_rx, needs_fetch))];

        Self {
            user_id,
            commands: commands_tx,
            view: view_rx,
            cancel,
            tasks: Mutex::new(tasks),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn view(&self) -> CacheView {
        self.view.borrow().clone()
    }

    pub fn sessions(&self) -> Vec<SessionSummary> {
        self.view.borrow().sessions.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.view.borrow().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.view.borrow().error.clone()
    }

    pub fn phase(&self) -> CachePhase {
        self.view.borrow().phase
    }

    /// Receiver notified on every change of the view.
    pub fn subscribe(&self) -> watch::Receiver<CacheView> {
        self.view.clone()
    }

    /// Resolves once the manager is in [`CachePhase::Ready`].
    pub async fn wait_until_ready(&self) -> CacheView {
        let mut view = self.view.clone();
        match view.wait_for(|v| v.phase == CachePhase::Ready).await {
            Ok(ready) => ready.clone(),
            Err(_) => self.view(),
        }
    }

    /// Puts `summary` at the head of the list and persists the result.
    pub async fn add_session(&self, summary: SessionSummary) {
        let (ack, done) = oneshot::channel();
        self.issue(Command::Add { summary, ack }, done).await;
    }

    /// Drops the session with `session_id`, if present, and persists the result.
    pub async fn remove_session(&self, session_id: &str) {
        let (ack, done) = oneshot::channel();
        let command = Command::Remove {
            session_id: session_id.to_string(),
            ack,
        };
        self.issue(command, done).await;
    }

    /// Refetches from the backend regardless of snapshot age.
    ///
    /// Joins a refresh that is already in flight instead of starting another.
    pub async fn refresh_sessions(&self) -> Result<(), String> {
        let (ack, done) = oneshot::channel();
        let command = Command::Refresh {
            reason: RefreshReason::Manual,
            ack: Some(ack),
        };
        if self.commands.send(command).is_err() {
            return Err("session cache has been shut down".to_string());
        }
        done.await
            .unwrap_or_else(|_| Err("session cache has been shut down".to_string()))
    }

    /// Stops the writer and waits for it to exit.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let tasks = std::mem::take(&mut *self.tasks.lock().unwrap_or_else(|poisoned| poisoned.into_inner()));
        for task in tasks {
            let _ = task.await;
        }
    }

    async fn issue<T>(&self, command: Command, done: oneshot::Receiver<T>) {
        if self.commands.send(command).is_err() {
            debug!("Ignoring session cache update for {} after shutdown", self.user_id);
            return;
        }
        let _ = done.await;
    }
}

impl Drop for SessionCacheManager {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn revalidation_due(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

struct Writer<A: ?Sized, C> {
    user_id: String,
    store: Arc<SessionCacheStore>,
    api: Arc<A>,
    clock: C,
    request_timeout: Option<Duration>,
    revalidate_every: Option<Duration>,
    /// Unset while a refresh is in flight and when revalidation is disabled.
    next_revalidation: Option<Instant>,
    state: CacheView,
    view: watch::Sender<CacheView>,
    commands: mpsc::UnboundedSender<Command>,
    cancel: CancellationToken,
    refresh_in_flight: bool,
    refresh_waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

impl<A, C> Writer<A, C>
where
    A: SessionsApi + ?Sized + 'static,
    C: Clock,
{
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>, initial_fetch: bool) {
        if initial_fetch {
            self.begin_refresh(RefreshReason::Initial, None);
        }

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                command = commands.recv() => match command {
                    Some(command) => self.apply(command),
                    None => break,
                },
                _ = revalidation_due(self.next_revalidation) => {
                    debug!("Session list for {} due for revalidation", self.user_id);
                    self.begin_refresh(RefreshReason::Background, None);
                }
            }
        }

        debug!("Session cache for {} torn down", self.user_id);
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Add { summary, ack } => {
                self.state.sessions.retain(|s| s.session_id != summary.session_id);
                self.state.sessions.insert(0, summary);
                self.persist_local_edit();
                let _ = ack.send(());
            }
            Command::Remove { session_id, ack } => {
                let before = self.state.sessions.len();
                self.state.sessions.retain(|s| s.session_id != session_id);
                if self.state.sessions.len() == before {
                    debug!("Session {} not cached, nothing to remove", session_id);
                } else {
                    self.persist_local_edit();
                }
                let _ = ack.send(());
            }
            Command::Refresh { reason, ack } => self.begin_refresh(reason, ack),
            Command::RefreshCompleted { result } => self.finish_refresh(result),
        }
    }

    fn begin_refresh(&mut self, reason: RefreshReason, ack: Option<oneshot::Sender<RefreshOutcome>>) {
        if let Some(ack) = ack {
            self.refresh_waiters.push(ack);
        }
        if self.refresh_in_flight {
            debug!("Session refresh for {} already in flight ({:?} request joined)", self.user_id, reason);
            return;
        }

        self.refresh_in_flight = true;
        self.next_revalidation = None;
        self.state.phase = CachePhase::Refreshing;
        self.publish();

        let api = self.api.clone();
        let user_id = self.user_id.clone();
        let timeout = self.request_timeout;
        let commands = self.commands.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            let fetch = async {
                let listing = match timeout {
                    Some(limit) => tokio::time::timeout(limit, api.list_sessions(&user_id))
                        .await
                        .unwrap_or(Err(Error::Timeout(limit))),
                    None => api.list_sessions(&user_id).await,
                };
                listing.and_then(to_summaries)
            };

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                result = fetch => result,
            };
            // The writer may be gone by now; the result is then dropped.
            let _ = commands.send(Command::RefreshCompleted { result });
        });
    }

    fn finish_refresh(&mut self, result: Result<Vec<SessionSummary>, Error>) {
        self.refresh_in_flight = false;
        // Failures also wait a full period before the next attempt.
        self.rearm_revalidation();

        let outcome = match result {
            Ok(entries) => {
                info!("Refreshed session list for {} ({} entries)", self.user_id, entries.len());
                let stamp = self.next_stamp();
                let snapshot = CacheSnapshot::new(entries, stamp);
                self.store.write(&self.user_id, &snapshot);
                self.state.sessions = snapshot.entries;
                self.state.last_refreshed_at = Some(stamp);
                self.state.error = None;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to refresh session list for {}: {}", self.user_id, e);
                let message = e.to_string();
                self.state.error = Some(message.clone());
                Err(message)
            }
        };

        self.state.phase = CachePhase::Ready;
        self.state.is_loading = false;
        self.publish();

        for waiter in self.refresh_waiters.drain(..) {
            let _ = waiter.send(outcome.clone());
        }
    }

    fn persist_local_edit(&mut self) {
        let stamp = self.next_stamp();
        let snapshot = CacheSnapshot::new(self.state.sessions.clone(), stamp);
        self.store.write(&self.user_id, &snapshot);
        self.state.last_refreshed_at = Some(stamp);
        if !self.refresh_in_flight {
            self.rearm_revalidation();
        }
        self.publish();
    }

    fn rearm_revalidation(&mut self) {
        self.next_revalidation = self.revalidate_every.map(|period| Instant::now() + period);
    }

    /// Stamps never move backwards, even if the clock does.
    fn next_stamp(&self) -> DateTime<Utc> {
        let now = self.clock.now();
        match self.state.last_refreshed_at {
            Some(previous) if previous > now => previous,
            _ => now,
        }
    }

    fn publish(&self) {
        self.view.send_replace(self.state.clone());
    }
}
