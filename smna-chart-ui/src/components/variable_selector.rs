//! Dropdown selector for the observation type ("Variável").

use super::CAPTION_STYLE;
use crate::state::AppState;
use dioxus::prelude::*;
use smna_data::dashboard::SelectionEvent;
use smna_gsi::observation::ObservationType;

#[component]
pub fn VariableSelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = state.selection().map(|s| s.observation_type);

    let on_change = move |evt: Event<FormData>| match evt.value().parse::<ObservationType>() {
        Ok(observation_type) => state.dispatch(SelectionEvent::SetObservationType(observation_type)),
        Err(e) => state.render_error.set(Some(e.to_string())),
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "variable-select",
                style: "{CAPTION_STYLE}",
                "Variável"
            }
            select {
                id: "variable-select",
                onchange: on_change,
                for observation_type in ObservationType::ALL {
                    option {
                        value: "{observation_type.label()}",
                        selected: current == Some(observation_type),
                        "{observation_type.label()}"
                    }
                }
            }
        }
    }
}
