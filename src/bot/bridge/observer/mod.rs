//! Observer implementations: console (tracing), rotating file, and a bounded queue
//! drained by the control panel.

pub mod console;
pub mod file;
pub mod queue;

pub use console::ConsoleObserver;
pub use file::RotatingFileObserver;
pub use queue::QueueObserver;
