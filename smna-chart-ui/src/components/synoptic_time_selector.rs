//! Radio buttons for the synoptic time ("Horário").

use super::CAPTION_STYLE;
use crate::state::AppState;
use dioxus::prelude::*;
use smna_data::dashboard::SelectionEvent;
use smna_gsi::synoptic::SynopticTime;

#[component]
pub fn SynopticTimeSelector() -> Element {
    let state = use_context::<AppState>();
    let current = state.selection().map(|s| s.synoptic_time);

    rsx! {
        fieldset {
            style: "margin: 8px 0; border: none; padding: 0;",
            legend { style: "{CAPTION_STYLE}", "Horário" }
            for (index, synoptic_time) in SynopticTime::UI_OPTIONS.into_iter().enumerate() {
                label {
                    key: "{index}",
                    style: "margin-right: 12px; white-space: nowrap;",
                    input {
                        r#type: "radio",
                        name: "synoptic-time",
                        value: "{synoptic_time.label()}",
                        checked: current == Some(synoptic_time),
                        onchange: move |_| state.dispatch(SelectionEvent::SetSynopticTime(synoptic_time)),
                    }
                    " {synoptic_time.label()}"
                }
            }
        }
    }
}
