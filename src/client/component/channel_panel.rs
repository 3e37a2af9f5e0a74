use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaHashtag;
use dioxus_free_icons::Icon;

use crate::bot::control::ControlPanel;
use crate::client::app::PanelState;

#[component]
pub fn ChannelPanel() -> Element {
    let panel = use_context::<ControlPanel>();
    let state = use_context::<PanelState>();
    let mut operating = use_signal(String::new);
    let mut log_channel = use_signal(String::new);
    let mut joining = use_signal(|| false);

    let snapshot = (state.snapshot)();
    let connected = snapshot.status.is_active();
    let current_log = snapshot
        .log_channel
        .map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string());

    let set_operating = {
        let panel = panel.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let panel = panel.clone();
            let channel = operating();
            joining.set(true);
            spawn(async move {
                let result = panel.set_operating_channel(&channel).await;
                state.report(result, &format!("Operating channel set to {}.", channel.trim()));
                joining.set(false);
            });
        }
    };

    let set_log = move |evt: FormEvent| {
        evt.prevent_default();
        let panel = panel.clone();
        let channel = log_channel();
        let success = if channel.trim().is_empty() {
            "Log channel cleared.".to_string()
        } else {
            format!("Log channel set to {}.", channel.trim())
        };
        spawn(async move {
            state.report(panel.set_log_channel(&channel).await, &success);
        });
    };

    rsx! {
        div {
            class: "card",
            h2 {
                class: "card-title",
                Icon { width: 16, height: 16, icon: FaHashtag }
                "Channels"
            }
            form {
                class: "row",
                onsubmit: set_operating,
                input {
                    r#type: "text",
                    class: "input",
                    placeholder: "Operating channel ID",
                    value: "{operating}",
                    oninput: move |evt| operating.set(evt.value()),
                }
                button {
                    r#type: "submit",
                    class: "btn",
                    disabled: !connected || joining(),
                    "Set"
                }
            }
            form {
                class: "row",
                onsubmit: set_log,
                input {
                    r#type: "text",
                    class: "input",
                    placeholder: "Log channel ID (blank to clear)",
                    value: "{log_channel}",
                    oninput: move |evt| log_channel.set(evt.value()),
                }
                button {
                    r#type: "submit",
                    class: "btn",
                    "Set"
                }
            }
            p { class: "muted", "Current log channel: {current_log}" }
        }
    }
}
