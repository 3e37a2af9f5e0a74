use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaFloppyDisk, FaKey};
use dioxus_free_icons::Icon;

use crate::bot::control::ControlPanel;
use crate::client::app::PanelState;

/// Shows the stored token masked and lets the operator replace it.
///
/// A new token takes effect on the next start.
#[component]
pub fn TokenPanel() -> Element {
    let panel = use_context::<ControlPanel>();
    let state = use_context::<PanelState>();
    let mut masked = use_signal({
        let panel = panel.clone();
        move || panel.masked_token()
    });
    let mut input = use_signal(String::new);

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let result = panel.save_token(&input());
        if result.is_ok() {
            masked.set(panel.masked_token());
            input.set(String::new());
        }
        state.report(result, "Token saved. It is used on the next start.");
    };

    rsx! {
        div {
            class: "card",
            h2 {
                class: "card-title",
                Icon { width: 16, height: 16, icon: FaKey }
                "Bot token"
            }
            if let Some(token) = masked() {
                code { "{token}" }
            } else {
                p { class: "muted", "No token stored." }
            }
            form {
                class: "row",
                onsubmit: save,
                input {
                    r#type: "password",
                    class: "input",
                    placeholder: "Paste a bot token",
                    autocomplete: "off",
                    value: "{input}",
                    oninput: move |evt| input.set(evt.value()),
                }
                button {
                    r#type: "submit",
                    class: "btn btn-primary",
                    disabled: input().trim().is_empty(),
                    Icon { width: 14, height: 14, icon: FaFloppyDisk }
                    "Save"
                }
            }
        }
    }
}
