use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaPlay, FaPowerOff, FaRotateRight, FaStop};
use dioxus_free_icons::Icon;

use crate::bot::control::ControlPanel;
use crate::client::app::PanelState;
use crate::model::session::Presence;

#[derive(Clone, Copy, PartialEq)]
enum Action {
    Start,
    Stop,
    Restart,
}

#[component]
pub fn SessionControls() -> Element {
    let panel = use_context::<ControlPanel>();
    let state = use_context::<PanelState>();
    let mut busy = use_signal(|| false);

    let snapshot = (state.snapshot)();
    let active = snapshot.status.is_active();
    let presence = snapshot.presence;

    let run = {
        let panel = panel.clone();
        move |action: Action| {
            let panel = panel.clone();
            busy.set(true);
            spawn(async move {
                let (result, success) = match action {
                    Action::Start => (panel.start().await, "Bot started."),
                    Action::Stop => (panel.stop().await, "Bot stopped."),
                    Action::Restart => (panel.restart().await, "Bot restarted."),
                };
                state.report(result, success);
                busy.set(false);
            });
        }
    };
    let mut start = run.clone();
    let mut stop = run.clone();
    let mut restart = run;

    let set_presence = move |evt: Event<FormData>| {
        let panel = panel.clone();
        let Ok(presence) = evt.value().parse::<Presence>() else {
            return;
        };
        spawn(async move {
            let result = panel.set_presence(presence).await;
            state.report(result, &format!("Presence set to {presence}."));
        });
    };

    rsx! {
        div {
            class: "card",
            h2 {
                class: "card-title",
                Icon { width: 16, height: 16, icon: FaPowerOff }
                "Session"
            }
            div {
                class: "row",
                button {
                    r#type: "button",
                    class: "btn btn-primary",
                    disabled: busy() || active,
                    onclick: move |_| start(Action::Start),
                    Icon { width: 14, height: 14, icon: FaPlay }
                    "Start"
                }
                button {
                    r#type: "button",
                    class: "btn btn-error",
                    disabled: busy() || !active,
                    onclick: move |_| stop(Action::Stop),
                    Icon { width: 14, height: 14, icon: FaStop }
                    "Stop"
                }
                button {
                    r#type: "button",
                    class: "btn",
                    disabled: busy(),
                    onclick: move |_| restart(Action::Restart),
                    Icon { width: 14, height: 14, icon: FaRotateRight }
                    "Restart"
                }
            }
            div {
                class: "row",
                label { r#for: "presence", "Presence" }
                select {
                    id: "presence",
                    class: "select",
                    disabled: !active,
                    onchange: set_presence,
                    option {
                        value: "",
                        selected: presence.is_none(),
                        disabled: true,
                        "Choose..."
                    }
                    for choice in Presence::ALL {
                        option {
                            key: "{choice}",
                            value: "{choice}",
                            selected: presence == Some(choice),
                            "{choice}"
                        }
                    }
                }
            }
        }
    }
}
