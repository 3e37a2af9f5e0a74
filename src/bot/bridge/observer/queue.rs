use tokio::sync::mpsc::{self, error::TrySendError};

use crate::bot::bridge::Observer;
use crate::bot::error::observer::ObserverError;
use crate::model::log::LogRecord;

/// Hands records to another thread through a bounded queue.
///
/// The control panel drains the receiving end on its own scheduler, so the session
/// thread never touches UI state. A full queue is reported as a failure instead of
/// blocking the publisher.
pub struct QueueObserver {
    name: String,
    sender: mpsc::Sender<LogRecord>,
}

impl QueueObserver {
    /// Creates an observer and the receiver its records are delivered to.
    pub fn channel(name: impl Into<String>, capacity: usize) -> (Self, mpsc::Receiver<LogRecord>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (
            Self {
                name: name.into(),
                sender,
            },
            receiver,
        )
    }
}

impl Observer for QueueObserver {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive(&self, record: &LogRecord) -> Result<(), ObserverError> {
        self.sender.try_send(record.clone()).map_err(|err| match err {
            TrySendError::Full(_) => ObserverError::Backlogged,
            TrySendError::Closed(_) => ObserverError::Closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::log::LogLevel;
    use chrono::Local;

    fn record(sequence: u64) -> LogRecord {
        LogRecord {
            sequence,
            at: Local::now(),
            level: LogLevel::Info,
            message: format!("record {sequence}"),
        }
    }

    #[test]
    fn delivers_in_order_until_full() {
        let (observer, mut receiver) = QueueObserver::channel("ui", 2);

        assert!(observer.receive(&record(1)).is_ok());
        assert!(observer.receive(&record(2)).is_ok());
        assert!(matches!(
            observer.receive(&record(3)),
            Err(ObserverError::Backlogged)
        ));

        assert_eq!(receiver.try_recv().unwrap().sequence, 1);
        assert_eq!(receiver.try_recv().unwrap().sequence, 2);
    }

    #[test]
    fn reports_closed_consumer() {
        let (observer, receiver) = QueueObserver::channel("ui", 4);
        drop(receiver);

        assert!(matches!(
            observer.receive(&record(1)),
            Err(ObserverError::Closed)
        ));
    }
}
