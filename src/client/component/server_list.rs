use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaServer;
use dioxus_free_icons::Icon;

use crate::bot::control::ControlPanel;
use crate::client::app::PanelState;

/// Servers the bot is in, each with its auto-moderation switch.
#[component]
pub fn ServerList() -> Element {
    let panel = use_context::<ControlPanel>();
    let state = use_context::<PanelState>();
    let servers = (state.servers)();

    rsx! {
        div {
            class: "card",
            h2 {
                class: "card-title",
                Icon { width: 16, height: 16, icon: FaServer }
                "Servers"
            }
            if servers.is_empty() {
                p { class: "muted", "Not in any servers." }
            } else {
                ul {
                    class: "list",
                    for (index, row) in servers.into_iter().enumerate() {
                        li {
                            key: "{row.summary.id}",
                            span { "{row.summary.name} ({row.summary.member_count} members)" }
                            label {
                                class: "row",
                                "Auto-mod"
                                input {
                                    r#type: "checkbox",
                                    checked: row.automod,
                                    onchange: {
                                        let panel = panel.clone();
                                        let summary = row.summary.clone();
                                        move |_| {
                                            let panel = panel.clone();
                                            let summary = summary.clone();
                                            let mut servers = state.servers;
                                            spawn(async move {
                                                let enabled = panel.toggle_automod(&summary).await;
                                                if let Some(row) = servers.write().get_mut(index) {
                                                    row.automod = enabled;
                                                }
                                            });
                                        }
                                    },
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
