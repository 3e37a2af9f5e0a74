//! Desktop control panel for the bot.
//!
//! The window talks to the session only through [`ControlPanel`], so nothing in
//! here blocks on the session thread.

pub mod app;
pub mod component;
pub mod feed;

pub use app::App;
pub use feed::LogFeed;

use dioxus::desktop::{Config, WindowBuilder};
use dioxus::prelude::*;

use crate::bot::control::ControlPanel;

pub const WINDOW_TITLE: &str = "Department 14";

/// Opens the control panel window and runs it until it is closed.
pub fn launch(panel: ControlPanel, feed: LogFeed) {
    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_resizable(true),
    );

    LaunchBuilder::desktop()
        .with_cfg(config)
        .with_context(panel)
        .with_context(feed)
        .launch(App);
}
