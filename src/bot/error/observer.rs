use thiserror::Error;

/// Failure of a single observer to accept a log record.
///
/// The event bridge catches these; one failing observer never prevents the others
/// from receiving the record.
#[derive(Error, Debug)]
pub enum ObserverError {
    /// Writing the record to disk failed.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// The observer's queue is full; the consumer is not keeping up.
    #[error("Observer queue is full")]
    Backlogged,

    /// The consumer side of the observer's queue has gone away.
    #[error("Observer queue is closed")]
    Closed,

    /// The observer panicked while handling the record.
    #[error("Observer panicked: {0}")]
    Panicked(String),
}
