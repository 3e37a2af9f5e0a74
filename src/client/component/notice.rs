use dioxus::prelude::*;

use crate::client::app::PanelState;

#[component]
pub fn NoticeBanner() -> Element {
    let state = use_context::<PanelState>();
    let mut notice = state.notice;

    rsx! {
        if let Some(current) = notice() {
            div {
                class: if current.ok { "alert alert-success" } else { "alert alert-error" },
                span { "{current.text}" }
                button {
                    r#type: "button",
                    class: "btn btn-outline",
                    onclick: move |_| notice.set(None),
                    "Dismiss"
                }
            }
        }
    }
}
