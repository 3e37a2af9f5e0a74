use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

use crate::bot::bridge::{observer::QueueObserver, EventBridge};
use crate::model::log::LogRecord;

/// Records buffered between the bridge and the log pane.
const FEED_CAPACITY: usize = 1024;

/// Receiving end of the control panel's bridge subscription.
///
/// The receiver can be taken exactly once, by the component that drains it.
#[derive(Clone)]
pub struct LogFeed {
    receiver: Arc<Mutex<Option<mpsc::Receiver<LogRecord>>>>,
}

impl LogFeed {
    /// Subscribes a queue observer to `bridge` and wraps its receiver.
    pub fn attach(bridge: &Arc<EventBridge>) -> Self {
        let (observer, receiver) = QueueObserver::channel("control-panel", FEED_CAPACITY);
        bridge.subscribe(Arc::new(observer));

        Self {
            receiver: Arc::new(Mutex::new(Some(receiver))),
        }
    }

    pub fn take(&self) -> Option<mpsc::Receiver<LogRecord>> {
        self.receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::log::LogLevel;

    /// Tests that records published on the bridge reach the feed.
    ///
    /// Expected: the record is in the receiver and a second take yields nothing
    #[test]
    fn feed_receives_bridge_records_once() {
        let bridge = Arc::new(EventBridge::new());
        let feed = LogFeed::attach(&bridge);

        bridge.publish_message(LogLevel::Info, "hello");

        let mut receiver = feed.take().unwrap();
        assert_eq!(receiver.try_recv().unwrap().message, "hello");
        assert!(feed.take().is_none());
    }
}
