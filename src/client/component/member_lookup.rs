use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaUsers;
use dioxus_free_icons::Icon;

use crate::bot::control::ControlPanel;
use crate::client::app::PanelState;

#[component]
pub fn MemberLookup() -> Element {
    let panel = use_context::<ControlPanel>();
    let state = use_context::<PanelState>();
    let mut channel = use_signal(String::new);
    let mut members = use_signal(|| None::<Vec<String>>);

    let connected = (state.snapshot)().status.is_active();

    let lookup = move |evt: FormEvent| {
        evt.prevent_default();
        let panel = panel.clone();
        let channel = channel();
        spawn(async move {
            match panel.online_members(&channel).await {
                Ok(found) => members.set(Some(found)),
                Err(e) => {
                    members.set(None);
                    state.fail(e);
                }
            }
        });
    };

    rsx! {
        div {
            class: "card",
            h2 {
                class: "card-title",
                Icon { width: 16, height: 16, icon: FaUsers }
                "Online members"
            }
            form {
                class: "row",
                onsubmit: lookup,
                input {
                    r#type: "text",
                    class: "input",
                    placeholder: "Channel ID",
                    value: "{channel}",
                    oninput: move |evt| channel.set(evt.value()),
                }
                button {
                    r#type: "submit",
                    class: "btn",
                    disabled: !connected,
                    "Look up"
                }
            }
            {
                match members() {
                    Some(names) if names.is_empty() => rsx! {
                        p { class: "muted", "Nobody is online there." }
                    },
                    Some(names) => rsx! {
                        ul {
                            class: "list",
                            for name in names {
                                li { key: "{name}", "{name}" }
                            }
                        }
                    },
                    None => rsx! {},
                }
            }
        }
    }
}
