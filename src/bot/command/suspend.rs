//! Parked command continuations.
//!
//! Commands that wait for a reaction or for a delay park here instead of
//! blocking the event loop. Each session owns one [`Suspensions`]; stopping the
//! session cancels everything still parked so no command outlives its session.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;

/// Which reaction resumes a parked confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionFilter {
    pub message_id: u64,
    pub user_id: u64,
    pub emoji: String,
}

impl ReactionFilter {
    fn matches(&self, message_id: u64, user_id: u64, emoji: &str) -> bool {
        self.message_id == message_id && self.user_id == user_id && self.emoji == emoji
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The awaited reaction arrived.
    Matched,
    /// The timeout or delay elapsed.
    TimedOut,
    /// The owning session stopped.
    Cancelled,
}

/// Handle to a registered wait. Registration happens before the wait itself so
/// that events racing the caller are not missed.
#[derive(Debug)]
pub struct Parked {
    id: u64,
    rx: oneshot::Receiver<()>,
}

struct Waiter {
    filter: Option<ReactionFilter>,
    tx: oneshot::Sender<()>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    waiters: HashMap<u64, Waiter>,
    closed: bool,
}

#[derive(Default)]
pub struct Suspensions {
    inner: Mutex<Inner>,
}

impl Suspensions {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a wait. `None` parks a plain delay that only time or
    /// cancellation resolves.
    ///
    /// Once the registry is cancelled every new registration resolves as
    /// [`WaitOutcome::Cancelled`] immediately.
    pub fn park(&self, filter: Option<ReactionFilter>) -> Parked {
        let (tx, rx) = oneshot::channel();
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;

        if !inner.closed {
            inner.waiters.insert(id, Waiter { filter, tx });
        }

        Parked { id, rx }
    }

    /// Waits on a registered handle for at most `timeout`.
    pub async fn wait(&self, parked: Parked, timeout: Duration) -> WaitOutcome {
        let Parked { id, rx } = parked;

        let outcome = match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(())) => WaitOutcome::Matched,
            Ok(Err(_)) => WaitOutcome::Cancelled,
            Err(_) => WaitOutcome::TimedOut,
        };

        self.lock().waiters.remove(&id);
        outcome
    }

    /// Drops a registration that will never be waited on.
    pub fn release(&self, parked: Parked) {
        self.lock().waiters.remove(&parked.id);
    }

    /// Sleeps for `delay`. Returns [`WaitOutcome::TimedOut`] when the full delay
    /// elapsed.
    pub async fn sleep(&self, delay: Duration) -> WaitOutcome {
        let parked = self.park(None);
        self.wait(parked, delay).await
    }

    /// Resumes every wait whose filter matches the reaction.
    ///
    /// # Returns
    /// Number of waits resumed
    pub fn notify_reaction(&self, message_id: u64, user_id: u64, emoji: &str) -> usize {
        let mut inner = self.lock();

        let matched: Vec<u64> = inner
            .waiters
            .iter()
            .filter(|(_, waiter)| {
                waiter
                    .filter
                    .as_ref()
                    .is_some_and(|filter| filter.matches(message_id, user_id, emoji))
            })
            .map(|(id, _)| *id)
            .collect();

        let mut resumed = 0;
        for id in matched {
            if let Some(waiter) = inner.waiters.remove(&id) {
                if waiter.tx.send(()).is_ok() {
                    resumed += 1;
                }
            }
        }
        resumed
    }

    /// Cancels every parked wait and refuses new ones.
    ///
    /// # Returns
    /// Number of waits cancelled
    pub fn cancel_all(&self) -> usize {
        let mut inner = self.lock();
        inner.closed = true;
        let cancelled = inner.waiters.len();
        // dropping the senders wakes each receiver with an error
        inner.waiters.clear();
        cancelled
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().closed
    }

    pub fn parked(&self) -> usize {
        self.lock().waiters.len()
    }
}
