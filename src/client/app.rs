use chrono::Local;
use dioxus::prelude::*;
use dioxus_logger::tracing;
use std::fmt;
use std::time::Duration;

use crate::bot::control::ControlPanel;
use crate::client::{
    component::{
        ChannelPanel, LogPane, MemberLookup, NoticeBanner, ServerList, SessionControls,
        StatusBar, TokenPanel,
    },
    feed::LogFeed,
};
use crate::model::log::LogRecord;
use crate::model::session::{ServerSummary, SessionSnapshot};

/// Records kept in the log pane; older ones are dropped first.
pub const MAX_RECORDS: usize = 1000;

const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

const STYLE: &str = r#"
:root { color-scheme: dark; }
body { margin: 0; font-family: system-ui, sans-serif; background: #1d232a; color: #a6adbb; }
.panel { display: flex; flex-direction: column; gap: 1rem; padding: 1rem; min-height: 100vh; box-sizing: border-box; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
.column { display: flex; flex-direction: column; gap: 1rem; }
.card { background: #2a323c; border-radius: 0.5rem; padding: 1rem; display: flex; flex-direction: column; gap: 0.75rem; }
.card-title { margin: 0; font-size: 1rem; font-weight: 600; color: #e5e7eb; display: flex; align-items: center; gap: 0.5rem; }
.row { display: flex; gap: 0.5rem; align-items: center; flex-wrap: wrap; }
.stats { display: flex; gap: 2rem; flex-wrap: wrap; }
.stat-title { font-size: 0.75rem; opacity: 0.6; }
.stat-value { font-size: 1.1rem; font-weight: 600; color: #e5e7eb; }
.btn { display: inline-flex; align-items: center; gap: 0.4rem; border: 1px solid #3d4451; background: #3d4451; color: #e5e7eb; border-radius: 0.4rem; padding: 0.4rem 0.8rem; cursor: pointer; }
.btn:disabled { opacity: 0.5; cursor: not-allowed; }
.btn-primary { background: #605dff; border-color: #605dff; }
.btn-error { background: #ff5861; border-color: #ff5861; }
.btn-outline { background: transparent; }
.input, .select { background: #1d232a; color: #e5e7eb; border: 1px solid #3d4451; border-radius: 0.4rem; padding: 0.4rem 0.6rem; flex: 1; min-width: 8rem; }
.badge { border-radius: 1rem; padding: 0.1rem 0.6rem; font-size: 0.8rem; background: #3d4451; color: #e5e7eb; }
.badge-success { background: #00a96e; }
.badge-warning { background: #ffbe00; color: #1d232a; }
.badge-error { background: #ff5861; }
.alert { border-radius: 0.4rem; padding: 0.5rem 0.8rem; display: flex; justify-content: space-between; }
.alert-success { background: #00a96e33; color: #00d390; }
.alert-error { background: #ff586133; color: #ff8f95; }
.list { list-style: none; margin: 0; padding: 0; display: flex; flex-direction: column; gap: 0.3rem; max-height: 14rem; overflow-y: auto; }
.list li { display: flex; justify-content: space-between; align-items: center; padding: 0.3rem 0.5rem; background: #1d232a; border-radius: 0.3rem; }
.log { font-family: ui-monospace, monospace; font-size: 0.8rem; background: #15191e; border-radius: 0.4rem; padding: 0.5rem; height: 16rem; overflow-y: auto; white-space: pre-wrap; }
.log-DEBUG { opacity: 0.6; }
.log-WARN { color: #ffbe00; }
.log-ERROR { color: #ff5861; }
.muted { opacity: 0.5; font-size: 0.85rem; }
"#;

/// Outcome of the last operator action, shown above the panels.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub ok: bool,
    pub text: String,
}

/// A server row together with its auto-moderation flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerRow {
    pub summary: ServerSummary,
    pub automod: bool,
}

/// Signals shared by every panel component.
#[derive(Clone, Copy)]
pub struct PanelState {
    pub snapshot: Signal<SessionSnapshot>,
    pub servers: Signal<Vec<ServerRow>>,
    pub records: Signal<Vec<LogRecord>>,
    pub notice: Signal<Option<Notice>>,
}

impl PanelState {
    fn new() -> Self {
        Self {
            snapshot: Signal::new(SessionSnapshot::default()),
            servers: Signal::new(Vec::new()),
            records: Signal::new(Vec::new()),
            notice: Signal::new(None),
        }
    }

    /// Shows the result of an operator action.
    pub fn report<E: fmt::Display>(&self, result: Result<(), E>, success: &str) {
        match result {
            Ok(()) => self.show(true, success.to_string()),
            Err(e) => self.fail(e),
        }
    }

    pub fn fail(&self, error: impl fmt::Display) {
        self.show(false, error.to_string());
    }

    fn show(&self, ok: bool, text: String) {
        let mut notice = self.notice;
        notice.set(Some(Notice { ok, text }));
    }
}

/// Appends a record, dropping the oldest ones beyond [`MAX_RECORDS`].
pub fn push_record(records: &mut Vec<LogRecord>, record: LogRecord) {
    records.push(record);
    if records.len() > MAX_RECORDS {
        let excess = records.len() - MAX_RECORDS;
        records.drain(..excess);
    }
}

async fn load_servers(panel: &ControlPanel) -> Vec<ServerRow> {
    let mut rows = Vec::new();
    for summary in panel.servers().await {
        let automod = panel.automod_enabled(summary.id).await;
        rows.push(ServerRow { summary, automod });
    }
    rows
}

#[component]
pub fn App() -> Element {
    let panel = use_context::<ControlPanel>();
    let feed = use_context::<LogFeed>();
    let state = use_context_provider(PanelState::new);
    let now = use_signal(Local::now);

    // Poll the session snapshot; reload the server list when it changes shape
    use_future(move || {
        let panel = panel.clone();
        let mut snapshot_signal = state.snapshot;
        let mut servers_signal = state.servers;
        let mut now = now;
        async move {
            let mut last_seen: Option<(String, usize)> = None;
            loop {
                match panel.snapshot().await {
                    Ok(snapshot) => {
                        let shape = (snapshot.status.to_string(), snapshot.server_count);
                        if last_seen.as_ref() != Some(&shape) {
                            servers_signal.set(load_servers(&panel).await);
                            last_seen = Some(shape);
                        }
                        if *snapshot_signal.peek() != snapshot {
                            snapshot_signal.set(snapshot);
                        }
                    }
                    Err(e) => tracing::debug!("Snapshot unavailable: {}", e),
                }
                now.set(Local::now());
                tokio::time::sleep(REFRESH_INTERVAL).await;
            }
        }
    });

    // Drain bridge records into the log pane
    use_future(move || {
        let feed = feed.clone();
        let mut records = state.records;
        async move {
            let Some(mut receiver) = feed.take() else {
                return;
            };
            while let Some(record) = receiver.recv().await {
                push_record(&mut records.write(), record);
            }
        }
    });

    rsx! {
        style { {STYLE} }
        div {
            class: "panel",
            StatusBar { now: now() }
            NoticeBanner {}
            div {
                class: "columns",
                div {
                    class: "column",
                    SessionControls {}
                    TokenPanel {}
                    ChannelPanel {}
                }
                div {
                    class: "column",
                    ServerList {}
                    MemberLookup {}
                }
            }
            LogPane {}
        }
    }
}
