use std::time::Duration;
use tokio::sync::oneshot;

use crate::bot::error::session::SessionError;

pub(crate) type Responder<T> = oneshot::Sender<Result<T, SessionError>>;

/// Result of a request submitted to the session thread.
///
/// Awaited with [`Pending::resolve`], or polled from a UI tick with
/// [`Pending::try_take`].
#[derive(Debug)]
pub struct Pending<T> {
    rx: oneshot::Receiver<Result<T, SessionError>>,
}

impl<T> Pending<T> {
    pub(crate) fn channel() -> (Responder<T>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// A request that failed before reaching the session thread.
    pub(crate) fn failed(err: SessionError) -> Self {
        let (tx, pending) = Self::channel();
        let _ = tx.send(Err(err));
        pending
    }

    /// Waits for the answer for at most `timeout`.
    ///
    /// # Returns
    /// - `Ok(T)` / `Err(_)` - The session's answer
    /// - `Err(SessionError::Timeout)` - No answer in time
    /// - `Err(SessionError::Closed)` - The session dropped the request
    pub async fn resolve(self, timeout: Duration) -> Result<T, SessionError> {
        match tokio::time::timeout(timeout, self.rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(SessionError::Closed),
            Err(_) => Err(SessionError::Timeout),
        }
    }

    /// Returns the result if it has arrived, without blocking.
    pub fn try_take(&mut self) -> Option<Result<T, SessionError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(SessionError::Closed)),
        }
    }
}
