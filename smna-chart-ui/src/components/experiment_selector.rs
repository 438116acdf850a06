//! Multi-select of experiments ("Experimentos").
//!
//! Checkboxes instead of a `<select multiple>`: each click toggles one
//! experiment, so the selection keeps the order in which experiments
//! were picked and the overlay draws lines in that order.

use super::CAPTION_STYLE;
use crate::state::AppState;
use dioxus::prelude::*;
use smna_data::dashboard::SelectionEvent;

#[component]
pub fn ExperimentSelector() -> Element {
    let state = use_context::<AppState>();
    let names = state.experiment_names();
    let selected = state
        .selection()
        .map(|s| s.experiments)
        .unwrap_or_default();

    rsx! {
        fieldset {
            style: "margin: 8px 0; border: none; padding: 0;",
            legend { style: "{CAPTION_STYLE}", "Experimentos" }
            for name in names {
                ExperimentOption {
                    key: "{name}",
                    checked: selected.contains(&name),
                    name: name.clone(),
                }
            }
        }
    }
}

#[component]
fn ExperimentOption(name: String, checked: bool) -> Element {
    let state = use_context::<AppState>();
    let id = format!("experiment-{}", name);
    let toggled = name.clone();

    rsx! {
        label {
            r#for: "{id}",
            style: "margin-right: 12px; white-space: nowrap;",
            input {
                id: "{id}",
                r#type: "checkbox",
                checked: checked,
                onclick: move |_| state.dispatch(SelectionEvent::ToggleExperiment(toggled.clone())),
            }
            " {name}"
        }
    }
}
