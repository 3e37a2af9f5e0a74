use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaFloppyDisk, FaTrash};
use dioxus_free_icons::Icon;
use std::path::PathBuf;

use crate::bot::control::save_log;
use crate::client::app::PanelState;

const DEFAULT_LOG_EXPORT: &str = "control_panel_log.txt";

/// Live view of the bridge records with export to a file.
#[component]
pub fn LogPane() -> Element {
    let state = use_context::<PanelState>();
    let mut records = state.records;
    let mut path = use_signal(|| DEFAULT_LOG_EXPORT.to_string());

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let target = PathBuf::from(path().trim());
        let result = save_log(&target, &records.read());
        state.report(result, &format!("Log saved to {}.", target.display()));
    };

    rsx! {
        div {
            class: "card",
            h2 { class: "card-title", "Log" }
            div {
                class: "log",
                if records.read().is_empty() {
                    span { class: "muted", "Nothing logged yet." }
                }
                for record in records.read().iter().rev() {
                    div {
                        key: "{record.sequence}",
                        class: "log-{record.level}",
                        "{record}"
                    }
                }
            }
            form {
                class: "row",
                onsubmit: save,
                input {
                    r#type: "text",
                    class: "input",
                    value: "{path}",
                    oninput: move |evt| path.set(evt.value()),
                }
                button {
                    r#type: "submit",
                    class: "btn",
                    disabled: path().trim().is_empty(),
                    Icon { width: 14, height: 14, icon: FaFloppyDisk }
                    "Save log"
                }
                button {
                    r#type: "button",
                    class: "btn btn-outline",
                    onclick: move |_| records.write().clear(),
                    Icon { width: 14, height: 14, icon: FaTrash }
                    "Clear"
                }
            }
        }
    }
}
