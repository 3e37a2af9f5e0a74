//! Domain types shared between the bot backend and the control panel.
//!
//! Nothing in here talks to Discord or the filesystem. These are the values that
//! cross the boundary between the session thread and the UI thread, so every type
//! is `Send` and cheap to clone.

pub mod credential;
pub mod log;
pub mod session;
