use chrono::{DateTime, Local};
use dioxus::prelude::*;

use crate::bot::control::{format_uptime, uptime, ControlPanel};
use crate::client::app::PanelState;
use crate::model::session::SessionStatus;

fn status_badge(status: &SessionStatus) -> &'static str {
    match status {
        SessionStatus::Connected => "badge badge-success",
        SessionStatus::Connecting => "badge badge-warning",
        SessionStatus::Failed(_) => "badge badge-error",
        SessionStatus::Disconnected => "badge",
    }
}

#[component]
pub fn StatusBar(now: DateTime<Local>) -> Element {
    let panel = use_context::<ControlPanel>();
    let state = use_context::<PanelState>();
    let snapshot = (state.snapshot)();

    let uptime = uptime(&snapshot, now)
        .map(format_uptime)
        .unwrap_or_else(|| "-".to_string());
    let presence = snapshot
        .presence
        .map(|presence| presence.to_string())
        .unwrap_or_else(|| "-".to_string());
    let operating = snapshot
        .operating_channel
        .map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string());
    let launched = panel.launched_at().format("%Y-%m-%d %H:%M");

    rsx! {
        div {
            class: "card",
            div {
                class: "stats",
                div {
                    div { class: "stat-title", "Status" }
                    span {
                        class: status_badge(&snapshot.status),
                        title: "{snapshot.status}",
                        "{snapshot.status.label()}"
                    }
                }
                div {
                    div { class: "stat-title", "Servers" }
                    div { class: "stat-value", "{snapshot.server_count}" }
                }
                div {
                    div { class: "stat-title", "Uptime" }
                    div { class: "stat-value", "{uptime}" }
                }
                div {
                    div { class: "stat-title", "Presence" }
                    div { class: "stat-value", "{presence}" }
                }
                div {
                    div { class: "stat-title", "Operating channel" }
                    div { class: "stat-value", "{operating}" }
                }
            }
            if let SessionStatus::Failed(reason) = &snapshot.status {
                p { class: "muted", "Last attempt failed: {reason}" }
            }
            p { class: "muted", "Panel open since {launched}" }
        }
    }
}
